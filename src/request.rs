//! Request descriptor value object.
//!
//! One descriptor is built per record and handed to a dispatcher; it is
//! never mutated after construction.

use std::collections::HashMap;

/// Fully-assembled request data derived from one record.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// HTTP verb.
    pub method: String,
    /// Complete URL, path segments and query string included.
    pub url: String,
    /// Headers applied to the request.
    pub headers: HashMap<String, String>,
    /// Raw body taken from the trailing record column, when configured.
    pub body: Option<String>,
}

impl RequestDescriptor {
    /// Starts a builder with the GET method and no URL, headers, or body.
    pub fn builder() -> RequestDescriptorBuilder {
        RequestDescriptorBuilder::default()
    }
}

/// Builder for [`RequestDescriptor`].
#[derive(Debug)]
pub struct RequestDescriptorBuilder {
    method: String,
    url: String,
    headers: HashMap<String, String>,
    body: Option<String>,
}

impl Default for RequestDescriptorBuilder {
    fn default() -> Self {
        Self {
            method: "GET".to_string(),
            url: String::new(),
            headers: HashMap::new(),
            body: None,
        }
    }
}

impl RequestDescriptorBuilder {
    /// Sets the HTTP verb. An empty string is ignored, keeping the GET
    /// default; a template without a verb means GET.
    pub fn method(mut self, method: &str) -> Self {
        if !method.is_empty() {
            self.method = method.to_string();
        }
        self
    }

    /// Sets the complete URL.
    pub fn url(mut self, url: String) -> Self {
        self.url = url;
        self
    }

    /// Replaces the header map.
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the raw request body.
    pub fn body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    /// Finishes the descriptor.
    pub fn build(self) -> RequestDescriptor {
        RequestDescriptor {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let descriptor = RequestDescriptor::builder().build();
        assert_eq!(descriptor.method, "GET");
        assert_eq!(descriptor.url, "");
        assert!(descriptor.headers.is_empty());
        assert_eq!(descriptor.body, None);
    }

    #[test]
    fn test_builder_full_chain() {
        let mut headers = HashMap::new();
        headers.insert("x-api-key".to_string(), "secret".to_string());

        let descriptor = RequestDescriptor::builder()
            .method("POST")
            .url("https://internal.example.com/api/users/123".to_string())
            .headers(headers)
            .body("{\"active\":true}".to_string())
            .build();

        assert_eq!(descriptor.method, "POST");
        assert_eq!(descriptor.url, "https://internal.example.com/api/users/123");
        assert_eq!(
            descriptor.headers.get("x-api-key"),
            Some(&"secret".to_string())
        );
        assert_eq!(descriptor.body, Some("{\"active\":true}".to_string()));
    }

    #[test]
    fn test_builder_empty_method_keeps_get() {
        let descriptor = RequestDescriptor::builder().method("").build();
        assert_eq!(descriptor.method, "GET");
    }
}
