//! Session flow tests
//!
//! Drives `ChatSession` through `ChatClient` against the real server bound to an
//! ephemeral port, with the LLM and payments API mocked.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{openai_text, openai_tool_call};
    use crate::common::mocks::spawn_server;
    use crate::common::{LLM_KEY, MockLlm, MockPayments, PAYMENTS_KEY, test_config};
    use paygent::core::forms::FormKind;
    use paygent::core::session::{ChatSession, ClientSettings, SessionStatus};
    use paygent::core::streaming::ChatStreamPart;
    use paygent::core::types::ToolResult;
    use paygent::sdk::{ChatClient, SdkError};
    use serde_json::{Value, json};
    use std::time::Duration;

    fn settings() -> ClientSettings {
        ClientSettings {
            openai_api_key: Some(LLM_KEY.to_string()),
            payman_api_key: Some(PAYMENTS_KEY.to_string()),
            ..ClientSettings::default()
        }
    }

    fn client(base_url: &str) -> ChatClient {
        ChatClient::new(base_url, Duration::from_secs(10)).expect("chat client")
    }

    /// Scenario B: collector, form, submission, executor
    #[actix_web::test]
    async fn test_payment_form_round_trip() {
        let llm = MockLlm::start().await;
        let payments = MockPayments::start().await;
        llm.queue_openai(openai_tool_call(
            "call_1",
            "initiatePayment",
            json!({"initialAmount": 50}),
        ))
        .await;
        llm.queue_openai(openai_tool_call(
            "call_2",
            "processPayment",
            json!({
                "amount": 50,
                "currency": "USD",
                "description": "Lunch",
                "recipientEmail": "alice@example.com"
            }),
        ))
        .await;
        llm.queue_openai(openai_text(&["Done! 50 USD sent to Alice."])).await;
        payments
            .respond("POST", "/payments/send-payment", 200, json!({"reference": "p_1"}), 1)
            .await;

        let base_url = spawn_server(test_config(&llm.uri(), &payments.uri())).expect("server");
        let client = client(&base_url);
        let mut session = ChatSession::new(settings());

        // First turn pauses on the payment form
        let request = session.submit_user_input("/send", Vec::new()).unwrap();
        assert_eq!(session.messages()[0].content, "I want to send money");
        let mut seen = Vec::new();
        let status = client
            .drive(&mut session, &request, |part| seen.push(part.clone()))
            .await
            .unwrap();
        assert_eq!(status, SessionStatus::AwaitingForm);
        assert!(seen.iter().any(|p| matches!(
            p,
            ChatStreamPart::ToolCall { tool_name, .. } if tool_name == "initiatePayment"
        )));

        let form = session.form_mut().expect("open form");
        assert_eq!(form.kind, FormKind::Payment);
        assert_eq!(form.submit_to, "processPayment");
        assert_eq!(form.field("amount").unwrap().value, "50");
        form.set("recipientEmail", "alice@example.com").unwrap();
        form.set("description", "Lunch").unwrap();

        // Submitting resumes the conversation and the executor runs
        let request = session.submit_form().unwrap();
        let status = client.drive(&mut session, &request, |_| {}).await.unwrap();
        assert_eq!(status, SessionStatus::Idle);
        assert!(session.banner().is_none());

        let last = session.messages().last().unwrap();
        assert!(last.content.contains("Done!"));
        let invocation = last.invocation("call_2").expect("processPayment invocation");
        assert_eq!(
            invocation.result,
            Some(ToolResult::text(
                "Payment of 50 USD successfully processed for Lunch"
            ))
        );

        // The model saw the submission, completed with the default currency
        let requests = llm.request_bodies().await;
        assert_eq!(requests.len(), 3);
        let submission = requests[1]["messages"]
            .as_array()
            .unwrap()
            .iter()
            .find(|m| m["role"] == "tool" && m["tool_call_id"] == "call_1")
            .expect("submission message");
        let content: Value = serde_json::from_str(submission["content"].as_str().unwrap()).unwrap();
        assert_eq!(content["kind"], "FORM_SUBMISSION");
        assert_eq!(content["args"]["currency"], "USD");
        assert_eq!(content["args"]["amount"], 50);

        assert_eq!(
            payments.request_bodies().await,
            vec![json!({
                "amountDecimal": 50,
                "customerEmail": "alice@example.com",
                "memo": "Lunch"
            })]
        );
    }

    #[actix_web::test]
    async fn test_cancelled_form_is_not_sent() {
        let llm = MockLlm::start().await;
        let payments = MockPayments::start().await;
        llm.queue_openai(openai_tool_call("call_1", "addPayee", json!({"name": "Bob"})))
            .await;
        llm.queue_openai(openai_text(&["Anything else?"])).await;

        let base_url = spawn_server(test_config(&llm.uri(), &payments.uri())).expect("server");
        let client = client(&base_url);
        let mut session = ChatSession::new(settings());

        let request = session.submit_user_input("/add", Vec::new()).unwrap();
        client.drive(&mut session, &request, |_| {}).await.unwrap();
        assert_eq!(session.form().unwrap().kind, FormKind::Payee);

        session.cancel_form().unwrap();
        assert_eq!(session.status(), SessionStatus::Idle);

        let request = session.submit_user_input("never mind", Vec::new()).unwrap();
        client.drive(&mut session, &request, |_| {}).await.unwrap();

        let requests = llm.request_bodies().await;
        let messages = requests[1]["messages"].as_array().unwrap();
        assert!(!messages.iter().any(|m| m["role"] == "tool"));
    }

    #[actix_web::test]
    async fn test_unauthorized_turn_sets_banner() {
        let llm = MockLlm::start().await;
        let payments = MockPayments::start().await;
        llm.expect_no_calls().await;

        let base_url = spawn_server(test_config(&llm.uri(), &payments.uri())).expect("server");
        let client = client(&base_url);
        let mut settings = settings();
        settings.openai_api_key = None;
        let mut session = ChatSession::new(settings);

        let request = session.submit_user_input("hi", Vec::new()).unwrap();
        let err = client.drive(&mut session, &request, |_| {}).await.unwrap_err();
        assert!(matches!(err, SdkError::MissingApiKey(_)));
        assert_eq!(session.status(), SessionStatus::Idle);
        assert!(session.banner().is_some());
    }

    #[actix_web::test]
    async fn test_provider_failure_reported_in_band() {
        let llm = MockLlm::start().await;
        let payments = MockPayments::start().await;
        // Nothing queued: the backend answers 404

        let base_url = spawn_server(test_config(&llm.uri(), &payments.uri())).expect("server");
        let client = client(&base_url);
        let mut session = ChatSession::new(settings());

        let request = session.submit_user_input("hi", Vec::new()).unwrap();
        let status = client.drive(&mut session, &request, |_| {}).await.unwrap();
        assert_eq!(status, SessionStatus::Idle);
        assert!(session.banner().is_some());
    }
}
