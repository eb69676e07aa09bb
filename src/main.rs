use actix_web::{web, App, HttpServer};
use stowage_categories::{config, create_app_state, Config};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    let settings = Config::from_env().map_err(std::io::Error::other)?;
    let registry = settings.load_registry().map_err(|e| {
        log::error!("Refusing to start: {}", e);
        std::io::Error::other(e)
    })?;
    let state = create_app_state(registry, settings.bucket_prefix.clone());
    log::info!("Starting server on {}:{}", settings.host, settings.port);
    for (name, category) in state.registry.iter() {
        log::info!("Category {} -> bucket {}", name, category.bucket_name(&state.bucket_prefix));
    }
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(config)
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
}
