//! 菜单资源族
//!
//! 分类不是独立存储的资源，由后端从条目派生；
//! `/menu/place/{id}` 是公开接口，供扫码菜单免登录访问。

use super::error::Endpoint;
use super::{ApiError, LocaffyApi};
use gloo_net::http::Request;
use locaffy_shared::MenuItem;
use locaffy_shared::protocol::MenuItemRequest;
use locaffy_shared::upload::validate_image;
use web_sys::FormData;

const MY_ITEMS: Endpoint = Endpoint::new("menu.my_items");
const MY_CATEGORIES: Endpoint = Endpoint::new("menu.my_categories");
const CREATE: Endpoint = Endpoint::new("menu.create");
const UPDATE: Endpoint = Endpoint::new("menu.update");
const DELETE: Endpoint = Endpoint::new("menu.delete");
const ITEM_IMAGE: Endpoint = Endpoint::new("menu.item_image");
const PUBLIC_MENU: Endpoint = Endpoint::new("menu.public");

impl LocaffyApi {
    /// 当前商家的全部菜品
    pub async fn my_menu_items(&self) -> Result<Vec<MenuItem>, ApiError> {
        let res = self
            .authorize(Request::get(&self.url("/menu/my-items")))
            .send()
            .await;
        Self::expect_json(res, &MY_ITEMS).await
    }

    /// 当前商家的分类列表（服务端去重派生）
    pub async fn my_menu_categories(&self) -> Result<Vec<String>, ApiError> {
        let res = self
            .authorize(Request::get(&self.url("/menu/my-categories")))
            .send()
            .await;
        Self::expect_json(res, &MY_CATEGORIES).await
    }

    /// 创建菜品，返回带 id 的权威实体
    pub async fn create_menu_item(&self, req: &MenuItemRequest) -> Result<MenuItem, ApiError> {
        let res = self
            .authorize(Request::post(&self.url("/menu/items")))
            .json(req)
            .map_err(ApiError::parse)?
            .send()
            .await;
        Self::expect_json(res, &CREATE).await
    }

    /// 更新菜品
    pub async fn update_menu_item(
        &self,
        id: i64,
        req: &MenuItemRequest,
    ) -> Result<MenuItem, ApiError> {
        let res = self
            .authorize(Request::put(&self.url(&format!("/menu/items/{id}"))))
            .json(req)
            .map_err(ApiError::parse)?
            .send()
            .await;
        Self::expect_json(res, &UPDATE).await
    }

    /// 删除菜品
    pub async fn delete_menu_item(&self, id: i64) -> Result<(), ApiError> {
        let res = self
            .authorize(Request::delete(&self.url(&format!("/menu/items/{id}"))))
            .send()
            .await;
        Self::expect_ok(res, &DELETE).await
    }

    /// 上传菜品图片（multipart；先过客户端校验）
    pub async fn upload_menu_item_image(
        &self,
        id: i64,
        file: &web_sys::File,
    ) -> Result<(), ApiError> {
        validate_image(&file.type_(), file.size() as u64)?;

        let form = FormData::new().map_err(|_| ApiError::network())?;
        form.append_with_blob("file", file)
            .map_err(|_| ApiError::network())?;

        let res = self
            .authorize(Request::post(&self.url(&format!("/menu/items/{id}/image"))))
            .body(form)
            .map_err(ApiError::parse)?
            .send()
            .await;
        Self::expect_ok(res, &ITEM_IMAGE).await
    }

    /// 创建菜品并可选上传图片
    ///
    /// 两步显式串联：必须先拿到创建返回的 id，才能发起上传。
    pub async fn create_menu_item_with_image(
        &self,
        req: &MenuItemRequest,
        image: Option<web_sys::File>,
    ) -> Result<MenuItem, ApiError> {
        let item = self.create_menu_item(req).await?;
        if let Some(file) = image {
            self.upload_menu_item_image(item.id, &file).await?;
        }
        Ok(item)
    }

    /// 门店的公开菜单（免登录，扫码菜单页使用）
    pub async fn public_menu(&self, place_id: i64) -> Result<Vec<MenuItem>, ApiError> {
        let res = Request::get(&self.url(&format!("/menu/place/{place_id}")))
            .send()
            .await;
        Self::expect_json(res, &PUBLIC_MENU).await
    }
}
