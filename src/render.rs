//! HTML page rendering.

use minijinja::{Environment, context};

const INDEX_TEMPLATE: &str = "index.html";

/// Owns the compiled templates. Built once and shared read-only.
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(INDEX_TEMPLATE, include_str!("../templates/index.html"))?;
        Ok(PageRenderer { env })
    }

    /// Renders the form, with the prediction message underneath when given.
    pub fn index(&self, prediction_text: Option<&str>) -> Result<String, minijinja::Error> {
        self.env
            .get_template(INDEX_TEMPLATE)?
            .render(context! { prediction_text => prediction_text })
    }
}
