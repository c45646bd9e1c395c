//! Tool dispatch tests
//!
//! Runs the executor against a mocked payments API and checks the outbound request
//! and the result fed back to the model.

#[cfg(test)]
mod tests {
    use crate::common::{MockPayments, PAYMENTS_KEY};
    use paygent::core::function_calling::{ToolExecutor, ToolRegistry};
    use paygent::core::payments::PaymentsClient;
    use paygent::core::types::{ToolArguments, ToolCall, ToolResult};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::time::Duration;

    fn executor(payments: &MockPayments) -> ToolExecutor {
        let client = PaymentsClient::new(payments.uri(), PAYMENTS_KEY, Duration::from_secs(5))
            .expect("payments client");
        ToolExecutor::new(Arc::new(ToolRegistry::standard()), client)
    }

    fn call(name: &str, args: Value) -> ToolCall {
        let args: ToolArguments = args.as_object().cloned().unwrap_or_default();
        ToolCall::new("call_1", name, args)
    }

    #[tokio::test]
    async fn test_process_payment_maps_fields() {
        let payments = MockPayments::start().await;
        payments
            .respond("POST", "/payments/send-payment", 200, json!({"reference": "p_1"}), 1)
            .await;

        let result = executor(&payments)
            .execute(&call(
                "processPayment",
                json!({
                    "amount": 50,
                    "currency": "USD",
                    "description": "Lunch",
                    "recipientEmail": "alice@example.com",
                    "recipientName": "Alice"
                }),
            ))
            .await;
        assert_eq!(
            result,
            ToolResult::text("Payment of 50 USD successfully processed for Lunch")
        );

        let sent = payments.request_bodies().await;
        assert_eq!(
            sent,
            vec![json!({
                "amountDecimal": 50,
                "customerEmail": "alice@example.com",
                "customerName": "Alice",
                "memo": "Lunch"
            })]
        );
    }

    #[tokio::test]
    async fn test_process_payment_empty_success_body_is_success() {
        let payments = MockPayments::start().await;
        payments
            .respond_raw("POST", "/payments/send-payment", 200, "", 1)
            .await;

        let result = executor(&payments)
            .execute(&call(
                "processPayment",
                json!({"amount": 12, "currency": "USD", "description": "Taxi"}),
            ))
            .await;
        assert_eq!(
            result,
            ToolResult::text("Payment of 12 USD successfully processed for Taxi")
        );
    }

    #[tokio::test]
    async fn test_search_payees_plain_text_success_body() {
        let payments = MockPayments::start().await;
        payments
            .respond_raw("GET", "/payments/search-payees", 200, "OK", 1)
            .await;

        let result = executor(&payments)
            .execute(&call("searchPayees", json!({"name": "Alice"})))
            .await;
        assert_eq!(result, ToolResult::text("Found payees: null"));
    }

    #[tokio::test]
    async fn test_process_payment_missing_field_makes_no_request() {
        let payments = MockPayments::start().await;
        payments
            .respond("POST", "/payments/send-payment", 200, json!({}), 0)
            .await;

        let result = executor(&payments)
            .execute(&call("processPayment", json!({"amount": 50, "currency": "USD"})))
            .await;
        assert!(result.is_error());
    }

    /// Scenario D: the API rejects a crypto payee without an address
    #[tokio::test]
    async fn test_create_payee_api_error_becomes_result() {
        let payments = MockPayments::start().await;
        payments
            .respond(
                "POST",
                "/payments/payees",
                400,
                json!({"message": "address is required for CRYPTO_ADDRESS payees"}),
                1,
            )
            .await;

        let result = executor(&payments)
            .execute(&call(
                "createPayee",
                json!({"type": "CRYPTO_ADDRESS", "name": "Cold wallet"}),
            ))
            .await;
        match result {
            ToolResult::Error { message } => {
                assert!(message.starts_with("Error: Failed to create payee"));
                assert!(message.contains("address is required"));
            }
            other => panic!("expected an error result, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_payee_request_body() {
        let payments = MockPayments::start().await;
        payments
            .respond(
                "POST",
                "/payments/payees",
                201,
                json!({"id": "pd_1", "name": "Bob Builder", "type": "US_ACH"}),
                1,
            )
            .await;

        let result = executor(&payments)
            .execute(&call(
                "createPayee",
                json!({
                    "type": "US_ACH",
                    "name": "Bob",
                    "accountNumber": "123",
                    "routingNumber": "011000015",
                    "contactEmail": "bob@example.com"
                }),
            ))
            .await;
        assert_eq!(result, ToolResult::text("Successfully created payee: Bob Builder"));

        let sent = payments.request_bodies().await;
        assert_eq!(sent[0]["type"], "US_ACH");
        assert_eq!(sent[0]["contactDetails"]["email"], "bob@example.com");
        assert_eq!(sent[0]["tags"], json!(["api_created"]));
        assert!(sent[0].get("address").is_none());
    }

    #[tokio::test]
    async fn test_search_payees_returns_json() {
        let payments = MockPayments::start().await;
        payments
            .respond(
                "GET",
                "/payments/search-payees",
                200,
                json!([{"id": "pd_1", "name": "Alice"}]),
                1,
            )
            .await;

        let result = executor(&payments)
            .execute(&call("searchPayees", json!({"name": "Alice"})))
            .await;
        assert_eq!(
            result,
            ToolResult::text(r#"Found payees: [{"id":"pd_1","name":"Alice"}]"#)
        );
    }

    #[tokio::test]
    async fn test_initiate_deposit_returns_checkout_url() {
        let payments = MockPayments::start().await;
        payments
            .respond(
                "POST",
                "/payments/customer-deposit-link",
                200,
                json!({"checkoutUrl": "https://pay.example.com/c/1"}),
                1,
            )
            .await;

        let result = executor(&payments)
            .execute(&call(
                "initiateDeposit",
                json!({"amount": "25.5", "customerId": "cus_1"}),
            ))
            .await;
        assert_eq!(
            result,
            ToolResult::text("Deposit initiated. Checkout URL: https://pay.example.com/c/1")
        );
        assert_eq!(payments.request_bodies().await[0]["amountDecimal"], 25.5);
    }

    #[tokio::test]
    async fn test_initiate_deposit_without_checkout_url() {
        let payments = MockPayments::start().await;
        payments
            .respond(
                "POST",
                "/payments/customer-deposit-link",
                200,
                json!({"status": "created"}),
                1,
            )
            .await;

        let result = executor(&payments)
            .execute(&call(
                "initiateDeposit",
                json!({"amount": 10, "customerId": "cus_2"}),
            ))
            .await;
        assert!(!result.is_error());
        assert_eq!(
            result,
            ToolResult::text("Deposit initiated. No checkout URL was returned.")
        );
    }

    #[tokio::test]
    async fn test_server_error_becomes_error_result() {
        let payments = MockPayments::start().await;
        payments
            .respond("GET", "/balances/currencies/USD", 503, json!({"error": "maintenance"}), 1)
            .await;

        let result = executor(&payments)
            .execute(&call("getBalance", json!({"currency": "USD"})))
            .await;
        assert!(result.is_error());
        assert!(result.to_model_content().contains("Error"));
        assert!(result.to_model_content().contains("maintenance"));
    }

    #[tokio::test]
    async fn test_add_payee_collects_without_request() {
        let payments = MockPayments::start().await;
        let result = executor(&payments)
            .execute(&call("addPayee", json!({"name": "Carol", "email": "carol@example.com"})))
            .await;

        match result {
            ToolResult::FormRequest { submit_to, args, .. } => {
                assert_eq!(submit_to, "createPayee");
                assert_eq!(args["contactEmail"], "carol@example.com");
            }
            other => panic!("expected a form request, got {:?}", other),
        }
        assert!(payments.request_bodies().await.is_empty());
    }
}
