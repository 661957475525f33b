//! 商家门店资源族（所有者视角）

use super::error::Endpoint;
use super::{ApiError, LocaffyApi};
use gloo_net::http::Request;
use locaffy_shared::Place;
use locaffy_shared::protocol::PlaceSettingsUpdate;

const PLACES: Endpoint = Endpoint::new("business.places");
const SETTINGS: Endpoint = Endpoint::new("business.settings");

impl LocaffyApi {
    /// 当前账号名下的门店列表（所有权由 token 隐含）
    pub async fn my_places(&self) -> Result<Vec<Place>, ApiError> {
        let res = self
            .authorize(Request::get(&self.url("/business/places")))
            .send()
            .await;
        Self::expect_json(res, &PLACES).await
    }

    /// 更新门店设置（营业时间、营业日等），返回权威的新状态
    pub async fn update_place_settings(
        &self,
        update: &PlaceSettingsUpdate,
    ) -> Result<Place, ApiError> {
        let res = self
            .authorize(Request::put(&self.url("/business/place/settings")))
            .json(update)
            .map_err(ApiError::parse)?
            .send()
            .await;
        Self::expect_json(res, &SETTINGS).await
    }
}
