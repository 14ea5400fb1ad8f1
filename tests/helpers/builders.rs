use serde_json::{json, Value};

/// Builder for distributor creation bodies
pub struct DistributorBuilder {
    name: String,
    parent: Option<String>,
    include: Vec<String>,
    exclude: Vec<String>,
}

impl DistributorBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }

    pub fn parent(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    pub fn include(mut self, regions: &[&str]) -> Self {
        self.include.extend(regions.iter().map(|r| r.to_string()));
        self
    }

    pub fn exclude(mut self, regions: &[&str]) -> Self {
        self.exclude.extend(regions.iter().map(|r| r.to_string()));
        self
    }

    pub fn body(&self) -> Value {
        let mut body = json!({
            "name": self.name,
            "include": self.include,
            "exclude": self.exclude,
        });
        if let Some(parent) = &self.parent {
            body["parent"] = json!(parent);
        }
        body
    }
}
