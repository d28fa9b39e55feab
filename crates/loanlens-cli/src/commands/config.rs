use super::Context;
use anyhow::Result;

/// Prints the effective configuration; with `save`, also writes it to
/// `config.toml` so flag and env overrides stick.
pub fn show(ctx: &Context<'_>, save: bool) -> Result<()> {
    if save {
        ctx.config_service.save(ctx.config)?;
        tracing::info!(path = %ctx.config_service.path().display(), "Configuration saved");
    }

    ctx.emit(ctx.config, |config| {
        println!("api_base_url         {}", config.api_base_url);
        match config.request_timeout_secs {
            Some(secs) => println!("request_timeout_secs {secs}"),
            None => println!("request_timeout_secs (transport default)"),
        }
        println!("log_level            {}", config.log_level);
        println!("log_to_file          {}", config.log_to_file);
        if save {
            println!("Saved to {}", ctx.config_service.path().display());
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use loanlens_application::LoanLensApp;
    use loanlens_core::config::ClientConfig;
    use loanlens_infrastructure::ConfigService;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_writes_effective_config() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(Some(temp_dir.path())).unwrap();
        let config = ClientConfig {
            api_base_url: "https://api.example.com/api".to_string(),
            request_timeout_secs: Some(15),
            ..Default::default()
        };
        let app = LoanLensApp::from_config(&config, Some(temp_dir.path())).unwrap();
        let ctx = Context {
            app: &app,
            config: &config,
            config_service: &service,
            json: true,
        };

        show(&ctx, true).unwrap();

        let saved = service.load_file().unwrap();
        assert_eq!(saved.api_base_url, "https://api.example.com/api");
        assert_eq!(saved.request_timeout_secs, Some(15));
        app.teardown().await;
    }

    #[tokio::test]
    async fn test_show_without_save_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(Some(temp_dir.path())).unwrap();
        let config = ClientConfig::default();
        let app = LoanLensApp::from_config(&config, Some(temp_dir.path())).unwrap();
        let ctx = Context {
            app: &app,
            config: &config,
            config_service: &service,
            json: true,
        };

        show(&ctx, false).unwrap();

        assert!(!service.path().exists());
        app.teardown().await;
    }
}
