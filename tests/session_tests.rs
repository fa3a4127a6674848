// Tests for session orchestration, the provider abstraction and target URL
// construction. A canned generator stands in for the remote backends, so
// nothing here touches the network.

#[cfg(test)]
mod tests {
    use fences::provider::text::{self, extract_chat_text, extract_message_text};
    use fences::proxy::build_target_url;
    use fences::{create_generator, AppError, OpenApiSpec, ProviderError, Session, SpecError, TextGenerator};
    use serde_json::{json, Value};

    /// A generator that always answers with a fixed string
    struct CannedGenerator {
        reply: String,
    }

    impl CannedGenerator {
        fn boxed(reply: &str) -> Box<dyn TextGenerator> {
            Box::new(CannedGenerator {
                reply: reply.to_string(),
            })
        }
    }

    impl TextGenerator for CannedGenerator {
        fn generate_text(&self, _prompt: &str) -> text::Result<String> {
            Ok(self.reply.clone())
        }
    }

    fn sample_spec() -> OpenApiSpec {
        OpenApiSpec::from_value(json!({
            "openapi": "3.0.0",
            "info": { "title": "Sample API", "version": "1.0.0" },
            "servers": [
                { "url": "http://api.sample.com/v1" },
                { "url": "http://staging.sample.com/v1" }
            ],
            "paths": {
                "/users": { "get": {}, "post": {} },
                "/users/{id}": { "get": {} }
            }
        }))
    }

    #[test]
    fn test_create_generator_accepts_known_kinds() {
        assert!(create_generator("openai", "test-key").is_ok());
        assert!(create_generator("anthropic", "test-key").is_ok());
    }

    #[test]
    fn test_create_generator_rejects_unknown_kind() {
        let result = create_generator("gemini", "test-key");
        match result {
            Err(ProviderError::InvalidProviderKind(kind)) => assert_eq!(kind, "gemini"),
            other => panic!("expected InvalidProviderKind, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_extract_chat_text() {
        let response = json!({
            "choices": [{ "message": { "role": "assistant", "content": "graph TD" } }]
        });
        assert_eq!(extract_chat_text(&response).unwrap(), "graph TD");
    }

    #[test]
    fn test_extract_chat_text_rejects_malformed_shape() {
        let response = json!({ "choices": [] });
        assert!(matches!(
            extract_chat_text(&response),
            Err(ProviderError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_extract_message_text() {
        let response = json!({
            "content": [{ "type": "text", "text": "graph TD" }]
        });
        assert_eq!(extract_message_text(&response).unwrap(), "graph TD");
    }

    #[test]
    fn test_extract_message_text_rejects_malformed_shape() {
        let response = json!({ "content": "graph TD" });
        assert!(matches!(
            extract_message_text(&response),
            Err(ProviderError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_target_server_is_first_declared_server() {
        let session = Session::with_generator(sample_spec(), CannedGenerator::boxed(""));
        assert_eq!(session.target_server(), Some("http://api.sample.com/v1"));
        assert_eq!(session.servers().len(), 2);
    }

    #[test]
    fn test_empty_server_list_yields_absent_target() {
        let spec = OpenApiSpec::from_value(json!({
            "info": { "title": "Serverless API" },
            "servers": []
        }));
        let session = Session::with_generator(spec, CannedGenerator::boxed(""));
        assert_eq!(session.target_server(), None);
        assert!(session.servers().is_empty());
    }

    #[test]
    fn test_missing_server_list_yields_absent_target() {
        let spec = OpenApiSpec::from_value(json!({ "info": { "title": "Bare API" } }));
        let session = Session::with_generator(spec, CannedGenerator::boxed(""));
        assert_eq!(session.target_server(), None);
        assert!(session.servers().is_empty());
    }

    #[test]
    fn test_interpret_normalizes_provider_output() {
        let reply = "```mermaid\nEnd_User-->||GET||/users/{id}\n```";
        let session = Session::with_generator(sample_spec(), CannedGenerator::boxed(reply));

        let overview = session.interpret().unwrap();
        assert_eq!(overview.title, "Sample API");
        assert_eq!(overview.diagram, "graph TD\n\nEnd_User-->|GET|/users/'id'/");
        assert_eq!(overview.server.len(), 2);
        assert_eq!(
            overview.spec.get("openapi").and_then(Value::as_str),
            Some("3.0.0")
        );
    }

    #[test]
    fn test_interpret_fails_loudly_without_title() {
        let spec = OpenApiSpec::from_value(json!({ "paths": {} }));
        let session = Session::with_generator(spec, CannedGenerator::boxed("graph TD"));

        match session.interpret() {
            Err(AppError::SpecError(SpecError::MissingField(field))) => {
                assert_eq!(field, "info.title")
            }
            other => panic!("expected MissingField, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_suggest_body_passes_provider_text_through_verbatim() {
        let reply = r#"{"name":"Test User","email":"test@example.com"}"#;
        let session = Session::with_generator(sample_spec(), CannedGenerator::boxed(reply));

        let suggested = session.suggest_body("/orders/", "POST").unwrap();
        assert_eq!(suggested.suggest_body, reply);
        assert_eq!(suggested.path, "/orders/");
        assert_eq!(suggested.method, "POST");
    }

    #[test]
    fn test_send_request_without_target_server_is_an_error() {
        let spec = OpenApiSpec::from_value(json!({ "info": { "title": "Serverless API" } }));
        let session = Session::with_generator(spec, CannedGenerator::boxed(""));

        let result = session.send_request("/users/", "GET", "");
        assert!(matches!(
            result,
            Err(fences::proxy::ProxyError::NoTargetServer)
        ));
    }

    #[test]
    fn test_build_target_url_strips_artificial_trailing_slash() {
        assert_eq!(
            build_target_url("http://api.example.com", "/users/'id'/"),
            "http://api.example.com/users/'id'"
        );
    }

    #[test]
    fn test_build_target_url_leaves_unslashed_path_alone() {
        assert_eq!(
            build_target_url("http://api.example.com", "/users"),
            "http://api.example.com/users"
        );
    }

    #[test]
    fn test_build_target_url_strips_at_most_one_slash() {
        assert_eq!(
            build_target_url("http://api.example.com", "/users//"),
            "http://api.example.com/users/"
        );
    }
}
