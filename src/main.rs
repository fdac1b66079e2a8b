use std::sync::Arc;

use chrono::Utc;
use color_eyre::eyre::Result;
use dotenv::dotenv;
use studyconnect_client::{
    actions::list_user_files,
    config::ClientConfig,
    geocode::{DisabledGeocoder, HttpGeocoder},
    screens::{FindScreen, GroupSessionsScreen, HomeScreen, NotificationsScreen},
};
use studyconnect_core::{
    models::file::FileKind,
    store::{BlobStorage, DocumentStore, Geocoder},
};
use studyconnect_db::{
    FsBlobStorage, MemoryStore, PgDocumentStore, create_pool, schema::initialize_database,
};
use tracing::{error, info, warn};
use tracing_subscriber::FmtSubscriber;

async fn open_store(config: &ClientConfig) -> Result<Arc<dyn DocumentStore>> {
    if let Some(database_url) = &config.database_url {
        let db_pool = create_pool(database_url).await?;
        initialize_database(&db_pool).await?;
        info!("Using Postgres document store");
        return Ok(Arc::new(PgDocumentStore::new(db_pool)));
    }

    match &config.seed_file {
        Some(path) => Ok(Arc::new(MemoryStore::load_seed_file(path).await?)),
        None => {
            warn!("No DATABASE_URL or SEED_FILE set, starting with an empty store");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

fn open_geocoder(config: &ClientConfig) -> Result<Arc<dyn Geocoder>> {
    match &config.geocoder_url {
        Some(url) => Ok(Arc::new(HttpGeocoder::new(url, config.request_timeout())?)),
        None => {
            warn!("GEOCODER_URL not set, only stored coordinates will be pinned");
            Ok(Arc::new(DisabledGeocoder))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ClientConfig::from_env()?;

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting StudyConnect (timezone {})", config.timezone);

    let store = open_store(&config).await?;
    let geocoder = open_geocoder(&config)?;
    let now = Utc::now();

    let mut home = HomeScreen::new(store.clone(), config.timezone);
    let mut notifications = NotificationsScreen::new(store.clone(), config.timezone);
    let mut find = FindScreen::new(store.clone(), geocoder, config.current_user_id.clone());

    home.activate_at(now).await;
    notifications.activate_at(now).await;
    find.activate().await;

    if let Some(error) = home.groups.error() {
        error!("Could not load groups: {}", error);
    }
    match home.sessions.loaded() {
        Some(aggregate) => match &aggregate.next_session {
            Some(session) => {
                info!(
                    "Next session: {} ({}) at {}",
                    session.session_name,
                    session.group_name,
                    session.session_date.with_timezone(&config.timezone)
                );

                let mut group = GroupSessionsScreen::new(store.clone(), config.timezone, &session.group_name);
                group.activate().await;
                if let Some(list) = group.sessions.loaded() {
                    info!("{} sessions scheduled for {}", list.sessions.len(), group.group_name());
                }
            }
            None => info!("No upcoming sessions"),
        },
        None => error!("Could not load sessions: {}", home.sessions.error().unwrap_or("unknown")),
    }

    if let Some(today) = notifications.sessions.loaded() {
        for session in &today.sessions {
            info!(
                "Today: {} at {}",
                session.session_name,
                session.session_date.with_timezone(&config.timezone).format("%H:%M")
            );
        }
    }

    if let Some(pins) = find.pins.loaded() {
        for pin in &pins.pins {
            info!(
                "Pin {} at ({:.4}, {:.4}) {}",
                pin.name, pin.coordinate.latitude, pin.coordinate.longitude, pin.color
            );
        }
    }

    if let Some(user_id) = &config.current_user_id {
        let storage = FsBlobStorage::new(config.storage_dir.clone()).await?;
        for kind in [FileKind::Note, FileKind::Recording] {
            let files = list_user_files(store.as_ref(), user_id, kind, now).await?;
            info!("{} {:?} files for {}", files.len(), kind, user_id);
            for file in &files {
                if let Err(e) = storage.get_blob(&file.file_url).await {
                    warn!("File {} is not available: {}", file.file_name, e);
                }
            }
        }
    }

    Ok(())
}
