// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sku_harvester::application::dispatcher::ExtractionDispatcher;
use sku_harvester::config::settings::Settings;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PRODUCT_PAGE: &str = r#"
<html><head><title>Cylinder</title></head><body>
  <h1 class="productTitle">Pneumatic Cylinder CDQ2B32-50D</h1>
  <span class="productPrice">Rs. 2,850</span>
  <div class="brandName"><a>SMC</a></div>
  <div class="specsTable"><table>
    <tr><th>Bore Size</th><td>32 mm</td></tr>
    <tr><th>Stroke</th><td>50 mm</td></tr>
  </table></div>
  <div class="prodImage">
    <img src="//static.industrybuying.com/cyl-1.jpg">
    <img src="/img/cyl-2.jpg">
  </div>
</body></html>
"#;

/// 使用默认配置与默认站点创建分发器
pub fn dispatcher() -> ExtractionDispatcher {
    dispatcher_with(Settings::default())
}

pub fn dispatcher_with(settings: Settings) -> ExtractionDispatcher {
    ExtractionDispatcher::new(&settings).expect("failed to build dispatcher")
}

/// 在模拟服务器上挂载一个返回指定内容的页面
pub async fn mount_page(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

pub fn html(status: u16, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_string(body)
}
