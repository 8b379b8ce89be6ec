//! Server order assembly and submission.
//!
//! An order is validated and fully assembled, including SSH key resolution,
//! before the user is asked to confirm it. Nothing is sent to the ordering
//! endpoint unless the user answers yes.

use serde::Serialize;
use tracing::{debug, info};

use crate::api::{ApiClient, ApiError, ValidationError};
use crate::resolve::resolve_ssh_keys;

/// User-supplied order parameters, as typed on the command line.
#[derive(Debug, Clone, Default)]
pub struct OrderOptions {
    pub sku: String,
    pub location: String,
    pub os_code: String,
    /// Values of zero or below order a single server.
    pub quantity: i64,
    pub license: String,
    /// Additional bandwidth in TB; zero or below adds none.
    pub bandwidth_tb: i64,
    pub support: String,
    /// SSH key labels; blank entries are ignored.
    pub ssh_key_labels: Vec<String>,
}

/// A validated order ready for confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderDraft {
    #[serde(rename = "sku_product_name")]
    pub sku: String,
    pub quantity: u64,
    #[serde(rename = "location_code")]
    pub location: String,
    #[serde(rename = "operating_system_product_code")]
    pub os_code: String,
    #[serde(rename = "license_product_code", skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(rename = "additional_bandwidth_tb", skip_serializing_if = "Option::is_none")]
    pub bandwidth_tb: Option<u64>,
    #[serde(rename = "support_level_product_code", skip_serializing_if = "Option::is_none")]
    pub support: Option<String>,
    /// Resolved key IDs, in the order the labels were given.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ssh_key_ids: Vec<u64>,
}

/// Result of a confirmed or declined order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderOutcome {
    /// The provider accepted the order and created these services.
    Placed(Vec<u64>),
    /// The user declined; nothing was submitted.
    Cancelled,
}

/// Asks the user whether to submit a draft.
pub trait Confirmation {
    /// Show `draft` and return the raw answer, or `None` if no answer could be read.
    fn ask(&mut self, draft: &OrderDraft) -> Option<String>;
}

impl<F> Confirmation for F
where
    F: FnMut(&OrderDraft) -> Option<String>,
{
    fn ask(&mut self, draft: &OrderDraft) -> Option<String> {
        self(draft)
    }
}

/// Whether an answer means "yes": `y` or `yes` in any case, surrounding
/// whitespace ignored.
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Check required fields in a fixed order.
///
/// # Errors
/// [`ValidationError::MissingField`] naming the first empty field.
pub fn validate(options: &OrderOptions) -> Result<(), ValidationError> {
    let required = [
        ("sku", &options.sku),
        ("datacenter", &options.location),
        ("os", &options.os_code),
    ];

    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField(field));
        }
    }
    Ok(())
}

/// Validate `options` and resolve SSH key labels into a draft.
///
/// Required fields are checked before any request is made.
///
/// # Errors
/// - [`ValidationError::MissingField`] for an empty sku, datacenter or os
/// - [`ValidationError::UnknownSshKey`] for the first label with no match
/// - any [`ApiError`] from listing SSH keys
pub async fn build_draft(client: &ApiClient, options: &OrderOptions) -> Result<OrderDraft, ApiError> {
    validate(options)?;

    let labels: Vec<&str> = options
        .ssh_key_labels
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();
    let ssh_key_ids: Vec<u64> = resolve_ssh_keys(client, &labels)
        .await?
        .into_iter()
        .map(|k| k.id)
        .collect();

    let draft = OrderDraft {
        sku: options.sku.clone(),
        quantity: u64::try_from(options.quantity)
            .ok()
            .filter(|q| *q > 0)
            .unwrap_or(1),
        location: options.location.clone(),
        os_code: options.os_code.clone(),
        license: non_empty(&options.license),
        bandwidth_tb: u64::try_from(options.bandwidth_tb).ok().filter(|b| *b > 0),
        support: non_empty(&options.support),
        ssh_key_ids,
    };

    debug!(?draft, "Assembled order draft");
    Ok(draft)
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Ask for confirmation and submit the draft once if the user agrees.
///
/// The draft is consumed whether or not it is submitted.
///
/// # Errors
/// Any [`ApiError`] from the order request; it is not retried.
pub async fn submit(
    client: &ApiClient,
    draft: OrderDraft,
    confirmation: &mut impl Confirmation,
) -> Result<OrderOutcome, ApiError> {
    let answer = confirmation.ask(&draft);
    if !answer.as_deref().is_some_and(is_affirmative) {
        debug!(?answer, "Order declined");
        return Ok(OrderOutcome::Cancelled);
    }

    info!(
        sku = %draft.sku,
        location = %draft.location,
        quantity = draft.quantity,
        "Submitting order"
    );
    let receipt = client.place_order(&draft).await?;
    info!(services = ?receipt.order_service_ids, "Order placed");

    Ok(OrderOutcome::Placed(receipt.order_service_ids))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::StaticToken;

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::with_base_url(server.uri(), StaticToken::new("test-token")).unwrap()
    }

    fn options() -> OrderOptions {
        OrderOptions {
            sku: "c1.small".into(),
            location: "NYC1".into(),
            os_code: "DEBIAN_12".into(),
            ..Default::default()
        }
    }

    fn draft() -> OrderDraft {
        OrderDraft {
            sku: "c1.small".into(),
            quantity: 1,
            location: "NYC1".into(),
            os_code: "DEBIAN_12".into(),
            license: None,
            bandwidth_tb: None,
            support: None,
            ssh_key_ids: Vec::new(),
        }
    }

    async fn mount_keys(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/ssh-keys"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "statusCode": 200,
                "message": "Success",
                "data": [{"id": 11, "label": "laptop"}, {"id": 12, "label": "ci"}]
            })))
            .mount(server)
            .await;
    }

    #[test]
    fn test_is_affirmative() {
        for yes in ["y", "Y", "yes", "YES ", "  Yes"] {
            assert!(is_affirmative(yes), "{yes:?}");
        }
        for no in ["", "n", "N", "no", "yep", "y e s", "ye"] {
            assert!(!is_affirmative(no), "{no:?}");
        }
    }

    #[test]
    fn test_validate_checks_fields_in_order() {
        let mut opts = OrderOptions::default();
        assert_eq!(validate(&opts), Err(ValidationError::MissingField("sku")));

        opts.sku = "c1.small".into();
        assert_eq!(validate(&opts), Err(ValidationError::MissingField("datacenter")));

        opts.location = "NYC1".into();
        assert_eq!(validate(&opts), Err(ValidationError::MissingField("os")));

        opts.os_code = "DEBIAN_12".into();
        assert_eq!(validate(&opts), Ok(()));
    }

    #[test]
    fn test_draft_omits_unset_optionals() {
        let body = serde_json::to_value(draft()).unwrap();
        assert_eq!(
            body,
            json!({
                "sku_product_name": "c1.small",
                "quantity": 1,
                "location_code": "NYC1",
                "operating_system_product_code": "DEBIAN_12"
            })
        );
    }

    #[tokio::test]
    async fn test_missing_field_makes_no_request() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&mock_server)
            .await;

        let opts = OrderOptions {
            location: String::new(),
            ssh_key_labels: vec!["laptop".into()],
            ..options()
        };
        let result = build_draft(&client_for(&mock_server), &opts).await;
        assert!(matches!(
            result,
            Err(ApiError::Validation(ValidationError::MissingField("datacenter")))
        ));
    }

    #[tokio::test]
    async fn test_zero_quantity_becomes_one() {
        let mock_server = MockServer::start().await;

        let opts = OrderOptions {
            quantity: 0,
            ..options()
        };
        let draft = build_draft(&client_for(&mock_server), &opts).await.unwrap();
        assert_eq!(draft.quantity, 1);

        let opts = OrderOptions {
            quantity: -3,
            bandwidth_tb: -1,
            ..options()
        };
        let draft = build_draft(&client_for(&mock_server), &opts).await.unwrap();
        assert_eq!(draft.quantity, 1);
        assert_eq!(draft.bandwidth_tb, None);
    }

    #[tokio::test]
    async fn test_optionals_and_key_labels_are_resolved() {
        let mock_server = MockServer::start().await;
        mount_keys(&mock_server).await;

        let opts = OrderOptions {
            quantity: 2,
            license: "CPANEL100".into(),
            bandwidth_tb: 5,
            support: String::new(),
            ssh_key_labels: vec![" ci ".into(), String::new(), "laptop".into()],
            ..options()
        };
        let draft = build_draft(&client_for(&mock_server), &opts).await.unwrap();

        assert_eq!(draft.quantity, 2);
        assert_eq!(draft.license.as_deref(), Some("CPANEL100"));
        assert_eq!(draft.bandwidth_tb, Some(5));
        assert_eq!(draft.support, None);
        assert_eq!(draft.ssh_key_ids, vec![12, 11]);
    }

    #[tokio::test]
    async fn test_unknown_key_label_stops_before_submission() {
        let mock_server = MockServer::start().await;
        mount_keys(&mock_server).await;
        Mock::given(method("POST"))
            .and(path("/server-orders/order"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let opts = OrderOptions {
            ssh_key_labels: vec!["laptop".into(), "no-such-key".into()],
            ..options()
        };
        let result = build_draft(&client_for(&mock_server), &opts).await;
        match result {
            Err(ApiError::Validation(ValidationError::UnknownSshKey(label))) => {
                assert_eq!(label, "no-such-key");
            }
            other => panic!("expected UnknownSshKey, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_declined_order_is_never_submitted() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/server-orders/order"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        for answer in [Some("N".to_string()), Some(String::new()), None] {
            let mut confirm = |_: &OrderDraft| answer.clone();
            let outcome = submit(&client, draft(), &mut confirm).await.unwrap();
            assert_eq!(outcome, OrderOutcome::Cancelled);
        }
    }

    #[tokio::test]
    async fn test_confirmed_order_is_submitted_once() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/server-orders/order"))
            .and(body_json(json!({
                "sku_product_name": "c1.small",
                "quantity": 1,
                "location_code": "NYC1",
                "operating_system_product_code": "DEBIAN_12",
                "ssh_key_ids": [11]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "statusCode": 200,
                "message": "Success",
                "data": {"order_service_ids": [5001]}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut shown = Vec::new();
        let mut confirm = |d: &OrderDraft| {
            shown.push(d.clone());
            Some("YES ".to_string())
        };
        let draft = OrderDraft {
            ssh_key_ids: vec![11],
            ..draft()
        };
        let outcome = submit(&client_for(&mock_server), draft, &mut confirm)
            .await
            .unwrap();

        assert_eq!(outcome, OrderOutcome::Placed(vec![5001]));
        assert_eq!(shown.len(), 1);
    }

    #[tokio::test]
    async fn test_submission_failure_is_surfaced() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/server-orders/order"))
            .respond_with(ResponseTemplate::new(422))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut confirm = |_: &OrderDraft| Some("y".to_string());
        let result = submit(&client_for(&mock_server), draft(), &mut confirm).await;
        assert!(matches!(result, Err(ApiError::UnexpectedStatus { code: 422 })));
    }
}
