//! Error handling integration tests
//!
//! Errors before the stream starts become HTTP statuses; errors after it starts
//! are reported in-band as an `error` part followed by `finish: error`.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{openai_raw_tool_call, openai_text, openai_tool_call};
    use crate::common::{
        MockLlm, MockPayments, PAYMENTS_KEY, chat_body, decode_parts, post_chat, test_config,
        user_message,
    };
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;
    use paygent::core::providers::ProviderError;
    use paygent::core::streaming::{ChatStreamPart, FinishReason};
    use paygent::core::types::ToolResult;
    use paygent::utils::error::PaygentError;
    use serde_json::{Value, json};

    // ==================== HTTP status mapping ====================

    #[test]
    fn test_provider_errors_map_to_statuses() {
        let err: PaygentError = ProviderError::from_status("openai", 401, "{}").into();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        let err: PaygentError = ProviderError::from_status("openai", 429, "slow down").into();
        assert_eq!(err.status_code(), StatusCode::TOO_MANY_REQUESTS);

        let err: PaygentError =
            ProviderError::from_status("anthropic", 500, r#"{"error":{"message":"boom"}}"#).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("boom"));
    }

    #[actix_web::test]
    async fn test_parsing_errors_hide_details() {
        let err = PaygentError::parsing("expected value at line 1 column 1: sk-secret");
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "Failed to process request");
        assert_eq!(body["code"], "PARSING_ERROR");
    }

    #[test]
    fn test_error_results_are_prefixed() {
        assert_eq!(
            ToolResult::error("Failed to retrieve balance: timeout").to_model_content(),
            "Error: Failed to retrieve balance: timeout"
        );
        assert_eq!(
            ToolResult::error("Error: already prefixed").to_model_content(),
            "Error: already prefixed"
        );
    }

    // ==================== Chat route ====================

    /// Scenario C: no Authorization header, no model call
    #[actix_web::test]
    async fn test_missing_authorization_is_401() {
        let llm = MockLlm::start().await;
        let payments = MockPayments::start().await;
        llm.expect_no_calls().await;

        let (status, body) = post_chat(
            test_config(&llm.uri(), &payments.uri()),
            chat_body(vec![user_message("m1", "hi")]),
            &[("x-payman-api-key", PAYMENTS_KEY)],
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["code"], "UNAUTHORIZED");
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn test_malformed_body_is_500_without_model_call() {
        let llm = MockLlm::start().await;
        let payments = MockPayments::start().await;
        llm.expect_no_calls().await;

        let (status, body) = post_chat(
            test_config(&llm.uri(), &payments.uri()),
            json!({"messages": "not a list"}),
            &[("Authorization", "Bearer sk-test"), ("x-payman-api-key", PAYMENTS_KEY)],
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "Failed to process request");
    }

    #[actix_web::test]
    async fn test_non_json_tool_arguments_abort_in_band() {
        let llm = MockLlm::start().await;
        let payments = MockPayments::start().await;
        llm.queue_openai(openai_raw_tool_call("call_1", "getBalance", "{currency: USD"))
            .await;

        let (status, body) = post_chat(
            test_config(&llm.uri(), &payments.uri()),
            chat_body(vec![user_message("m1", "balance?")]),
            &[("Authorization", "Bearer sk-test"), ("x-payman-api-key", PAYMENTS_KEY)],
        )
        .await;
        // Headers were sent before the model answered
        assert_eq!(status, StatusCode::OK);

        let parts = decode_parts(body).await;
        assert!(parts.iter().any(|p| matches!(
            p,
            ChatStreamPart::Error { error } if error.contains("Invalid arguments for tool getBalance")
        )));
        assert_eq!(
            parts.last(),
            Some(&ChatStreamPart::Finish { reason: FinishReason::Error })
        );
        assert!(payments.request_bodies().await.is_empty());
    }

    #[actix_web::test]
    async fn test_rejected_llm_key_reported_in_band() {
        let llm = MockLlm::start().await;
        let payments = MockPayments::start().await;
        // Unmatched requests get a 404 from the mock server

        let (status, body) = post_chat(
            test_config(&llm.uri(), &payments.uri()),
            chat_body(vec![user_message("m1", "hi")]),
            &[("Authorization", "Bearer sk-bad"), ("x-payman-api-key", PAYMENTS_KEY)],
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let parts = decode_parts(body).await;
        assert!(matches!(parts[1], ChatStreamPart::Error { .. }));
        assert_eq!(
            parts.last(),
            Some(&ChatStreamPart::Finish { reason: FinishReason::Error })
        );
    }

    /// Payments failures are tool-level: the turn goes on
    #[actix_web::test]
    async fn test_payments_error_keeps_turn_going() {
        let llm = MockLlm::start().await;
        let payments = MockPayments::start().await;
        llm.queue_openai(openai_tool_call(
            "call_1",
            "createPayee",
            json!({"type": "CRYPTO_ADDRESS", "name": "Cold wallet"}),
        ))
        .await;
        llm.queue_openai(openai_text(&["I need the wallet address."])).await;
        payments
            .respond(
                "POST",
                "/payments/payees",
                400,
                json!({"message": "address is required"}),
                1,
            )
            .await;

        let (_, body) = post_chat(
            test_config(&llm.uri(), &payments.uri()),
            chat_body(vec![user_message("m1", "add my wallet")]),
            &[("Authorization", "Bearer sk-test"), ("x-payman-api-key", PAYMENTS_KEY)],
        )
        .await;
        let parts = decode_parts(body).await;

        assert!(parts.iter().any(|p| matches!(
            p,
            ChatStreamPart::ToolResult { result: ToolResult::Error { message }, .. }
                if message.contains("address is required")
        )));
        assert!(parts.contains(&ChatStreamPart::TextDelta {
            text: "I need the wallet address.".to_string()
        }));
        assert_eq!(
            parts.last(),
            Some(&ChatStreamPart::Finish { reason: FinishReason::Stop })
        );
        assert_eq!(llm.request_bodies().await.len(), 2);
    }
}
