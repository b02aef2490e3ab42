//! Draft order creation flow.
//!
//! One request runs at most two sequential upstream calls: an optional
//! lookup (product by handle, or shop currency), then the create call.

use draft_proxy_core::{CurrencyCode, LineTitle, Price, ProductHandle, Quantity};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::orders::{
    DraftOrder, LineItem, OrderRequest, OrderTarget, UpstreamApi, ValidatedOrder,
    ValidationError, draft_order_name,
};
use crate::shopify::ProductLookup;
use crate::state::AppState;

const PRODUCT_LOOKUP_FAILED: &str = "Failed to lookup product";
const CURRENCY_LOOKUP_FAILED: &str = "Failed to lookup shop currency";
const PRODUCT_NOT_FOUND: &str = "Product not found in back-store";

/// Create a draft order for `request` and return its invoice URL.
///
/// # Errors
///
/// - `AppError::Validation` if the request lacks or mangles a required field
/// - `AppError::NotFound` if the product handle matches no purchasable product
/// - `AppError::Lookup` if the product or currency lookup fails upstream
/// - `AppError::Upstream` if Shopify rejects the draft order
#[instrument(skip_all, fields(mode = %state.config().orders.mode))]
pub async fn create_draft_order(state: &AppState, request: &OrderRequest) -> Result<String> {
    let settings = &state.config().orders;
    let ValidatedOrder {
        price,
        quantity,
        target,
    } = request.validate(settings.mode, &settings.default_title)?;

    let line = match target {
        OrderTarget::ProductHandle(handle) => {
            variant_line_for_handle(state, &handle, quantity, price).await?
        }
        OrderTarget::Variant(variant_id) => LineItem::variant(variant_id, quantity, price),
        OrderTarget::Custom(title) => custom_line(state, title, quantity, price)?,
    };

    let order = DraftOrder {
        name: draft_order_name(&mut rand::rng()),
        line,
    };

    let invoice_url = match settings.mode.api() {
        UpstreamApi::Rest => state.shopify().create_draft_order(&order.to_rest()).await?,
        UpstreamApi::GraphQL => {
            let currency = order_currency(state).await?;
            state
                .shopify()
                .draft_order_create(&order.to_graphql(&currency))
                .await?
        }
    };

    tracing::info!(name = %order.name, invoice_url = %invoice_url, "Draft order created");
    Ok(invoice_url)
}

/// Resolve a product handle to a variant line item.
async fn variant_line_for_handle(
    state: &AppState,
    handle: &ProductHandle,
    quantity: Quantity,
    price: Price,
) -> Result<LineItem> {
    let lookup = state
        .shopify()
        .find_variant_by_handle(handle)
        .await
        .map_err(|source| AppError::Lookup {
            message: PRODUCT_LOOKUP_FAILED,
            source,
        })?;

    match lookup {
        ProductLookup::Found(variant_id) => Ok(LineItem::variant(variant_id, quantity, price)),
        ProductLookup::NoProduct | ProductLookup::NoVariants => {
            tracing::info!(handle = %handle, ?lookup, "Product handle did not resolve");
            Err(AppError::NotFound(PRODUCT_NOT_FOUND.to_string()))
        }
    }
}

fn custom_line(
    state: &AppState,
    title: LineTitle,
    quantity: Quantity,
    price: Price,
) -> Result<LineItem> {
    LineItem::custom(title, quantity, price, state.config().orders.line_pricing)
        .map_err(|e| AppError::Validation(ValidationError::Price(e)))
}

/// Configured currency, or the shop's own when none is configured.
async fn order_currency(state: &AppState) -> Result<CurrencyCode> {
    if let Some(currency) = &state.config().orders.currency {
        return Ok(currency.clone());
    }

    state
        .shopify()
        .shop_currency()
        .await
        .map_err(|source| AppError::Lookup {
            message: CURRENCY_LOOKUP_FAILED,
            source,
        })
}
