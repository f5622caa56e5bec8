//! IAM Credential Service

use std::sync::Arc;

use arx_bootstrap::{init_runtime, shutdown_signal};
use arx_config::AppConfig;
use iam_credential::application::CredentialService;
use iam_credential::infrastructure::persistence::InMemoryUserStore;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载配置；缺失签名密钥在这里失败，进程不会开始接受流量
    let config = AppConfig::load("config")?;

    // 初始化运行时
    init_runtime(&config);

    // 指标记录器全局安装一次；抓取端点由部署侧网关提供
    let _metrics = arx_telemetry::init_metrics();

    info!("Starting IAM Credential Service");

    let store = Arc::new(InMemoryUserStore::new());
    let service = CredentialService::from_config(&config, store)?;

    info!(
        host = %config.server.host,
        port = config.server.port,
        "Credential service ready; revocation entries: {}",
        service.blacklist().len()
    );

    shutdown_signal().await;

    Ok(())
}
