//! GraphQL Admin API calls.

use tracing::instrument;

use super::{
    AdminClient, ShopifyError,
    types::{DraftOrderCreateData, DraftOrderInput},
};

/// `draftOrderCreate` mutation, selecting only what the proxy returns.
pub const DRAFT_ORDER_CREATE: &str = r"
    mutation draftOrderCreate($input: DraftOrderInput!) {
        draftOrderCreate(input: $input) {
            draftOrder {
                id
                invoiceUrl
            }
            userErrors {
                field
                message
            }
        }
    }
";

impl AdminClient {
    /// Create a draft order through the `draftOrderCreate` mutation and
    /// return its invoice URL.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::GraphQL` for top-level errors,
    /// `ShopifyError::UserErrors` when the mutation rejects the input, and
    /// `ShopifyError::MissingField` if no invoice URL comes back.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn draft_order_create(&self, input: &DraftOrderInput) -> Result<String, ShopifyError> {
        let variables = serde_json::json!({ "input": input });
        let data: DraftOrderCreateData = self.execute(DRAFT_ORDER_CREATE, variables).await?;

        let payload = data
            .draft_order_create
            .ok_or(ShopifyError::MissingField("draftOrderCreate"))?;

        if !payload.user_errors.is_empty() {
            return Err(ShopifyError::UserErrors(payload.user_errors));
        }

        let draft_order = payload
            .draft_order
            .ok_or(ShopifyError::MissingField("draftOrder"))?;

        if let Some(id) = &draft_order.id {
            tracing::info!(draft_order_id = %id, "Draft order created");
        }

        draft_order
            .invoice_url
            .filter(|url| !url.is_empty())
            .ok_or(ShopifyError::MissingField("invoiceUrl"))
    }
}
