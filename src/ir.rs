use serde::{Deserialize, Serialize};

/// One horizontal tier of the diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub name: String,
    #[serde(default)]
    pub components: Vec<String>,
    pub color: String,
}

impl LayerSpec {
    pub fn new(name: &str, components: &[&str], color: &str) -> Self {
        Self {
            name: name.to_string(),
            components: components.iter().map(|c| c.to_string()).collect(),
            color: color.to_string(),
        }
    }
}

/// A directed flow between two layers, drawn as a vertical connector at
/// `anchor_x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionSpec {
    pub from: String,
    pub to: String,
    pub label: String,
    #[serde(alias = "labelAnchorX", alias = "x")]
    pub anchor_x: f32,
    /// Explicit label column. Defaults to `anchor_x` plus the configured offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_x: Option<f32>,
}

impl ConnectionSpec {
    pub fn new(from: &str, to: &str, label: &str, anchor_x: f32) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            label: label.to_string(),
            anchor_x,
            label_x: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub layers: Vec<LayerSpec>,
    #[serde(default)]
    pub connections: Vec<ConnectionSpec>,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a diagram description. Accepts JSON5, so plain JSON works too.
    pub fn parse(input: &str) -> anyhow::Result<Self> {
        let diagram: Diagram = json5::from_str(input)?;
        Ok(diagram)
    }

    pub fn layer(&self, name: &str) -> Option<&LayerSpec> {
        self.layers.iter().find(|layer| layer.name == name)
    }

    /// The collaborative document platform: seven tiers from client apps down
    /// to file storage.
    pub fn sample() -> Self {
        let layers = vec![
            LayerSpec::new(
                "Client Apps",
                &["Web Browser", "Mobile App", "Desktop App"],
                "#1FB8CD",
            ),
            LayerSpec::new("Load Balancer", &["NGINX/AWS ALB"], "#DB4545"),
            LayerSpec::new(
                "WebSocket Srvs",
                &["Socket.io Srv1", "Socket.io Srv2", "Socket.io SrvN"],
                "#2E8B57",
            ),
            LayerSpec::new(
                "App Servers",
                &["Node.js+Exp 1", "Node.js+Exp 2", "Node.js+Exp N"],
                "#5D878F",
            ),
            LayerSpec::new("Redis Cache", &["Redis Cluster"], "#D2BA4C"),
            LayerSpec::new("Database", &["MongoDB", "PostgreSQL"], "#B4413C"),
            LayerSpec::new("File Storage", &["AWS S3"], "#964325"),
        ];
        let connections = vec![
            ConnectionSpec::new("Client Apps", "Load Balancer", "HTTPS/WSS", 9.5),
            ConnectionSpec::new("Load Balancer", "WebSocket Srvs", "WSS", 9.5),
            ConnectionSpec::new("WebSocket Srvs", "App Servers", "HTTP/RPC", 9.5),
            ConnectionSpec::new("App Servers", "Redis Cache", "Redis Proto", 9.5),
            ConnectionSpec::new("App Servers", "Database", "TCP/SQL", 7.5),
            ConnectionSpec::new("App Servers", "File Storage", "HTTPS", 5.5),
        ];
        Self {
            title: Some("Collab Doc Platform Architecture".to_string()),
            layers,
            connections,
        }
    }
}
