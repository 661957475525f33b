//! 门店图片资源族
//!
//! multipart 上传，上限 2MB，仅限 JPEG/PNG/GIF/WebP；
//! 校验在客户端先做，不合规的文件不发起网络请求。

use super::error::Endpoint;
use super::{ApiError, LocaffyApi};
use gloo_net::http::Request;
use locaffy_shared::upload::validate_image;
use web_sys::FormData;

const UPLOAD: Endpoint = Endpoint::new("image.upload_logo");
const DELETE: Endpoint = Endpoint::new("image.delete_logo");

impl LocaffyApi {
    /// 上传门店 logo（该字段同时用作横幅，沿用后端数据模型）
    pub async fn upload_place_logo(
        &self,
        place_id: i64,
        file: &web_sys::File,
    ) -> Result<(), ApiError> {
        validate_image(&file.type_(), file.size() as u64)?;

        let form = FormData::new().map_err(|_| ApiError::network())?;
        form.append_with_blob("file", file)
            .map_err(|_| ApiError::network())?;

        let res = self
            .authorize(Request::post(
                &self.url(&format!("/images/place/{place_id}/logo")),
            ))
            .body(form)
            .map_err(ApiError::parse)?
            .send()
            .await;
        Self::expect_ok(res, &UPLOAD).await
    }

    /// 删除门店 logo
    pub async fn delete_place_logo(&self, place_id: i64) -> Result<(), ApiError> {
        let res = self
            .authorize(Request::delete(
                &self.url(&format!("/images/place/{place_id}/logo")),
            ))
            .send()
            .await;
        Self::expect_ok(res, &DELETE).await
    }
}
