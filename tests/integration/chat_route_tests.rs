//! Chat route tests
//!
//! Each test posts a conversation to `/api/chat`, lets the real turn loop run
//! against mocked backends, and decodes the streamed parts.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{anthropic_text, openai_text, openai_tool_call};
    use crate::common::{
        LLM_KEY, MockLlm, MockPayments, PAYMENTS_KEY, chat_body, decode_parts, post_chat,
        test_config, user_message,
    };
    use actix_web::http::StatusCode;
    use paygent::core::streaming::{ChatStreamPart, FinishReason};
    use paygent::core::types::ToolResult;
    use serde_json::{Value, json};

    fn auth_headers() -> Vec<(&'static str, &'static str)> {
        vec![
            ("Authorization", "Bearer sk-test"),
            ("x-payman-api-key", PAYMENTS_KEY),
        ]
    }

    fn tool_results(parts: &[ChatStreamPart]) -> Vec<&ToolResult> {
        parts
            .iter()
            .filter_map(|p| match p {
                ChatStreamPart::ToolResult { result, .. } => Some(result),
                _ => None,
            })
            .collect()
    }

    #[actix_web::test]
    async fn test_plain_text_turn_streams_and_finishes() {
        let llm = MockLlm::start().await;
        let payments = MockPayments::start().await;
        llm.queue_openai(openai_text(&["Hello", ", how can I help?"])).await;

        let (status, body) = post_chat(
            test_config(&llm.uri(), &payments.uri()),
            chat_body(vec![user_message("m1", "hi")]),
            &auth_headers(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.ends_with(b"data: [DONE]\n\n"));

        let parts = decode_parts(body).await;
        assert!(matches!(parts[0], ChatStreamPart::Start { .. }));
        let text: String = parts
            .iter()
            .filter_map(|p| match p {
                ChatStreamPart::TextDelta { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(text, "Hello, how can I help?");
        assert_eq!(
            parts.last(),
            Some(&ChatStreamPart::Finish { reason: FinishReason::Stop })
        );

        let requests = llm.request_bodies().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0]["stream"], true);
        assert!(requests[0]["tools"].as_array().is_some_and(|t| t.len() == 9));
    }

    /// Scenario A: a balance lookup runs on the server and is fed back to the model
    #[actix_web::test]
    async fn test_get_balance_round_trip() {
        let llm = MockLlm::start().await;
        let payments = MockPayments::start().await;
        llm.queue_openai(openai_tool_call("call_1", "getBalance", json!({"currency": "USD"})))
            .await;
        llm.queue_openai(openai_text(&["You have 123.45 USD."])).await;
        payments
            .respond("GET", "/balances/currencies/USD", 200, json!(123.45), 1)
            .await;

        let (status, body) = post_chat(
            test_config(&llm.uri(), &payments.uri()),
            chat_body(vec![user_message("m1", "What's my balance?")]),
            &auth_headers(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let parts = decode_parts(body).await;
        assert!(parts.contains(&ChatStreamPart::ToolCall {
            tool_call_id: "call_1".to_string(),
            tool_name: "getBalance".to_string(),
            args: json!({"currency": "USD"}).as_object().cloned().unwrap(),
        }));
        assert_eq!(
            tool_results(&parts),
            vec![&ToolResult::text("Available balance: 123.45 USD")]
        );
        assert_eq!(
            parts.last(),
            Some(&ChatStreamPart::Finish { reason: FinishReason::Stop })
        );

        let requests = llm.request_bodies().await;
        assert_eq!(requests.len(), 2);
        let messages = requests[1]["messages"].as_array().unwrap();
        let tool_message = messages.last().unwrap();
        assert_eq!(tool_message["role"], "tool");
        assert_eq!(tool_message["tool_call_id"], "call_1");
        assert_eq!(tool_message["content"], "Available balance: 123.45 USD");
    }

    #[actix_web::test]
    async fn test_collector_pauses_without_second_model_call() {
        let llm = MockLlm::start().await;
        let payments = MockPayments::start().await;
        llm.queue_openai(openai_tool_call(
            "call_1",
            "initiatePayment",
            json!({"initialAmount": 50}),
        ))
        .await;

        let (_, body) = post_chat(
            test_config(&llm.uri(), &payments.uri()),
            chat_body(vec![user_message("m1", "I want to send money")]),
            &auth_headers(),
        )
        .await;
        let parts = decode_parts(body).await;

        match tool_results(&parts).as_slice() {
            [ToolResult::FormRequest {
                tool_call_id,
                tool_name,
                submit_to,
                args,
            }] => {
                assert_eq!(tool_call_id, "call_1");
                assert_eq!(tool_name, "initiatePayment");
                assert_eq!(submit_to, "processPayment");
                assert_eq!(args["amount"], 50);
            }
            other => panic!("expected one form request, got {:?}", other),
        }
        assert_eq!(
            parts.last(),
            Some(&ChatStreamPart::Finish { reason: FinishReason::AwaitingInput })
        );
        assert_eq!(llm.request_bodies().await.len(), 1);
        assert!(payments.request_bodies().await.is_empty());
    }

    #[actix_web::test]
    async fn test_client_deferred_tool_makes_no_payments_call() {
        let llm = MockLlm::start().await;
        let payments = MockPayments::start().await;
        llm.queue_openai(openai_tool_call(
            "call_9",
            "confirmPayment",
            json!({"amount": 20, "currency": "USD", "description": "Rent"}),
        ))
        .await;

        let (_, body) = post_chat(
            test_config(&llm.uri(), &payments.uri()),
            chat_body(vec![user_message("m1", "pay rent")]),
            &auth_headers(),
        )
        .await;
        let parts = decode_parts(body).await;

        assert!(matches!(
            tool_results(&parts).as_slice(),
            [ToolResult::FormRequest { tool_call_id, submit_to, .. }]
                if tool_call_id == "call_9" && submit_to == "confirmPayment"
        ));
        assert!(payments.request_bodies().await.is_empty());
    }

    #[actix_web::test]
    async fn test_anthropic_provider_selected_per_request() {
        let llm = MockLlm::start().await;
        let payments = MockPayments::start().await;
        llm.queue_anthropic(anthropic_text("Hi from Claude")).await;

        let mut body = chat_body(vec![user_message("m1", "hi")]);
        body["provider"] = json!("anthropic");
        let (status, body) = post_chat(
            test_config(&llm.uri(), &payments.uri()),
            body,
            &auth_headers(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let parts = decode_parts(body).await;
        assert!(parts.contains(&ChatStreamPart::TextDelta {
            text: "Hi from Claude".to_string()
        }));

        let requests = llm.request_bodies().await;
        assert!(requests[0].get("system").is_some());
    }

    #[actix_web::test]
    async fn test_history_with_form_submission_reaches_model() {
        let llm = MockLlm::start().await;
        let payments = MockPayments::start().await;
        llm.queue_openai(openai_text(&["Sending now."])).await;

        let history = vec![
            user_message("m1", "send 50 to alice"),
            json!({
                "id": "m2",
                "role": "assistant",
                "content": "",
                "toolInvocations": [{
                    "toolCallId": "call_1",
                    "toolName": "initiatePayment",
                    "args": {"initialAmount": 50},
                    "result": {
                        "kind": "FORM_SUBMISSION",
                        "toolName": "processPayment",
                        "args": {"amount": 50, "currency": "USD", "description": "Lunch", "recipientEmail": "alice@example.com"}
                    }
                }]
            }),
        ];
        let (status, _) = post_chat(
            test_config(&llm.uri(), &payments.uri()),
            chat_body(history),
            &auth_headers(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let requests = llm.request_bodies().await;
        let messages = requests[0]["messages"].as_array().unwrap();
        let tool_message = messages
            .iter()
            .find(|m| m["role"] == "tool")
            .expect("tool message");
        let content: Value =
            serde_json::from_str(tool_message["content"].as_str().unwrap()).unwrap();
        assert_eq!(content["kind"], "FORM_SUBMISSION");
        assert_eq!(content["toolName"], "processPayment");
    }

    #[actix_web::test]
    async fn test_payments_key_falls_back_to_config() {
        let llm = MockLlm::start().await;
        let payments = MockPayments::start().await;
        llm.queue_openai(openai_tool_call("call_1", "getBalance", json!({"currency": "EUR"})))
            .await;
        llm.queue_openai(openai_text(&["ok"])).await;
        payments
            .respond(
                "GET",
                "/balances/currencies/EUR",
                200,
                json!({"currency": "EUR", "spendableBalance": "10.00"}),
                1,
            )
            .await;

        let mut config = test_config(&llm.uri(), &payments.uri());
        config.payments.api_secret = Some(PAYMENTS_KEY.to_string());
        let authorization = format!("Bearer {}", LLM_KEY);
        let (_, body) = post_chat(
            config,
            chat_body(vec![user_message("m1", "balance in EUR")]),
            &[("Authorization", authorization.as_str())],
        )
        .await;

        let parts = decode_parts(body).await;
        assert_eq!(
            tool_results(&parts),
            vec![&ToolResult::text("Available balance: 10.00 EUR")]
        );
    }
}
