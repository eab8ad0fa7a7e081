//! `/admin/*` endpoints: back-office CRUD over products, users, orders,
//! banners, and coupons. Conventional resource-oriented request/response
//! pairs; all require an admin bearer token.

use serde::Serialize;
use tracing::instrument;

use super::ApiClient;
use crate::errors::StorefrontError;
use crate::models::{
    Banner, BannerInput, Coupon, CouponInput, Order, OrderStatus, Product, ProductInput,
    UserProfile,
};

#[derive(Debug, Serialize)]
struct ToggleFeaturedRequest {
    featured: bool,
}

#[derive(Debug, Serialize)]
struct UpdateRoleRequest<'a> {
    role: &'a str,
}

#[derive(Debug, Serialize)]
struct UpdateStatusRequest {
    status: OrderStatus,
}

impl ApiClient {
    // Products

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_product(&self, input: &ProductInput) -> Result<Product, StorefrontError> {
        self.post_json("/admin/create-product", input).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_product(
        &self,
        id: &str,
        input: &ProductInput,
    ) -> Result<Product, StorefrontError> {
        self.put_json(&format!("/admin/update-product/{id}"), input)
            .await
    }

    #[instrument(skip(self))]
    pub async fn toggle_featured(
        &self,
        id: &str,
        featured: bool,
    ) -> Result<Product, StorefrontError> {
        self.patch_json(
            &format!("/admin/products/{id}/toggle-featured"),
            &ToggleFeaturedRequest { featured },
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> Result<(), StorefrontError> {
        let _: serde_json::Value = self
            .delete_json(&format!("/admin/delete-product/{id}"))
            .await?;
        Ok(())
    }

    /// `GET /admin/` — full product list for the dashboard.
    #[instrument(skip(self))]
    pub async fn admin_products(&self) -> Result<Vec<Product>, StorefrontError> {
        self.get_json("/admin/").await
    }

    // Users

    #[instrument(skip(self))]
    pub async fn all_users(&self) -> Result<Vec<UserProfile>, StorefrontError> {
        self.get_json("/admin/users").await
    }

    #[instrument(skip(self))]
    pub async fn update_user_role(
        &self,
        id: &str,
        role: &str,
    ) -> Result<UserProfile, StorefrontError> {
        self.patch_json(
            &format!("/admin/users/{id}/role"),
            &UpdateRoleRequest { role },
        )
        .await
    }

    // Orders

    #[instrument(skip(self))]
    pub async fn all_orders(&self) -> Result<Vec<Order>, StorefrontError> {
        self.get_json("/admin/all-orders/").await
    }

    #[instrument(skip(self))]
    pub async fn order_details(&self, id: &str) -> Result<Order, StorefrontError> {
        self.get_json(&format!("/admin/order-details/{id}")).await
    }

    /// `PATCH /admin/update-status/{id}` — the only mutation an order
    /// receives after creation.
    #[instrument(skip(self))]
    pub async fn update_order_status(
        &self,
        id: &str,
        status: OrderStatus,
    ) -> Result<Order, StorefrontError> {
        self.patch_json(
            &format!("/admin/update-status/{id}"),
            &UpdateStatusRequest { status },
        )
        .await
    }

    // Banners

    #[instrument(skip(self))]
    pub async fn banners(&self) -> Result<Vec<Banner>, StorefrontError> {
        self.get_json("/admin/get-banner").await
    }

    #[instrument(skip(self))]
    pub async fn banner(&self, id: &str) -> Result<Banner, StorefrontError> {
        self.get_json(&format!("/admin/get-banner/{id}")).await
    }

    #[instrument(skip(self, input))]
    pub async fn create_banner(&self, input: &BannerInput) -> Result<Banner, StorefrontError> {
        self.post_json("/admin/create-banner", input).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_banner(
        &self,
        id: &str,
        input: &BannerInput,
    ) -> Result<Banner, StorefrontError> {
        self.patch_json(&format!("/admin/update-banner/{id}"), input)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_banner(&self, id: &str) -> Result<(), StorefrontError> {
        let _: serde_json::Value = self
            .delete_json(&format!("/admin/delete-banner/{id}"))
            .await?;
        Ok(())
    }

    // Coupons

    #[instrument(skip(self))]
    pub async fn all_coupons(&self) -> Result<Vec<Coupon>, StorefrontError> {
        self.get_json("/admin/coupons").await
    }

    #[instrument(skip(self, input), fields(code = %input.code))]
    pub async fn create_coupon(&self, input: &CouponInput) -> Result<Coupon, StorefrontError> {
        self.post_json("/admin/create-coupon", input).await
    }

    #[instrument(skip(self))]
    pub async fn delete_coupon(&self, id: &str) -> Result<(), StorefrontError> {
        let _: serde_json::Value = self
            .delete_json(&format!("/admin/delete-coupon/{id}"))
            .await?;
        Ok(())
    }
}
