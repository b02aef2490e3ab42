//! REST Admin API calls: product lookup, shop currency, draft orders.

use draft_proxy_core::{CurrencyCode, ProductHandle, VariantId};
use tracing::instrument;

use super::{
    AdminClient, ShopifyError,
    types::{ProductsResponse, RestDraftOrderRequest, RestDraftOrderResponse, ShopResponse},
};

/// Outcome of looking a product up by handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductLookup {
    /// First variant of the first matching product.
    Found(VariantId),
    /// No product has this handle.
    NoProduct,
    /// The product exists but has no purchasable variant.
    NoVariants,
}

impl AdminClient {
    /// Find the first variant of the product with the given handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn find_variant_by_handle(
        &self,
        handle: &ProductHandle,
    ) -> Result<ProductLookup, ShopifyError> {
        let mut url = self.endpoint("products.json")?;
        url.query_pairs_mut().append_pair("handle", handle.as_str());

        let response: ProductsResponse = self.get_json(url).await?;

        let Some(product) = response.products.into_iter().next() else {
            return Ok(ProductLookup::NoProduct);
        };

        let variant = product
            .variants
            .into_iter()
            .find_map(|v| VariantId::new(v.id).ok());

        Ok(variant.map_or(ProductLookup::NoVariants, ProductLookup::Found))
    }

    /// Fetch the shop's default currency.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails, or
    /// `ShopifyError::MissingField` if the shop has no valid currency.
    #[instrument(skip(self))]
    pub async fn shop_currency(&self) -> Result<CurrencyCode, ShopifyError> {
        let url = self.endpoint("shop.json")?;
        let response: ShopResponse = self.get_json(url).await?;

        response
            .shop
            .currency
            .as_deref()
            .and_then(|code| CurrencyCode::parse(code).ok())
            .ok_or(ShopifyError::MissingField("currency"))
    }

    /// Create a draft order over REST and return its invoice URL.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::Status` with the upstream `errors` when the
    /// draft order is rejected, or `ShopifyError::MissingField` if the
    /// created order carries no invoice URL.
    #[instrument(skip(self, body), fields(name = %body.draft_order.name))]
    pub async fn create_draft_order(
        &self,
        body: &RestDraftOrderRequest,
    ) -> Result<String, ShopifyError> {
        let url = self.endpoint("draft_orders.json")?;
        let response: RestDraftOrderResponse = self.post_json(url, body).await?;

        response
            .draft_order
            .invoice_url
            .filter(|url| !url.is_empty())
            .ok_or(ShopifyError::MissingField("invoice_url"))
    }
}
