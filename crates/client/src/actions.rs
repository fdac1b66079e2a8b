//! Single-call create/read/update operations behind the form screens.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde_json::Value;
use studyconnect_core::{
    errors::{StudyError, StudyResult},
    models::{
        file::{FileKind, NewFileDocument, StoredFile},
        group::{CreateGroupRequest, NewGroupDocument},
        session::CreateSessionRequest,
        user::{RegisterProfileRequest, UpdateProfileRequest, UserProfile},
    },
    record::{Record, collections, fields, into_fields},
    store::{BlobStorage, Direction, DocumentStore, Query},
};
use tracing::{info, warn};
use uuid::Uuid;

fn require(value: &str, what: &str) -> StudyResult<()> {
    if value.trim().is_empty() {
        return Err(StudyError::Validation(format!("{} must not be empty", what)));
    }
    Ok(())
}

fn validate_email(email: &str) -> StudyResult<()> {
    let email = email.trim();
    match email.split_once('@') {
        Some((user, domain)) if !user.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(StudyError::Validation(format!("Invalid email address: {}", email))),
    }
}

/// Creates a group, uploading its image first when one is attached.
///
/// Returns the new group id. An image upload failure aborts creation.
pub async fn create_group<S, B>(store: &S, storage: &B, request: CreateGroupRequest) -> StudyResult<String>
where
    S: DocumentStore + ?Sized,
    B: BlobStorage + ?Sized,
{
    require(&request.name, "Group name")?;
    require(&request.description, "Group description")?;
    require(&request.admin_name, "Admin name")?;

    let image_url = match request.image {
        Some(bytes) => {
            let path = format!("group_images/{}.jpg", Uuid::new_v4());
            Some(storage.put_blob(&path, bytes).await?)
        }
        None => None,
    };

    let document = NewGroupDocument {
        name: request.name.trim().to_string(),
        description: request.description.trim().to_string(),
        admin_name: request.admin_name.trim().to_string(),
        selected_color: request.color,
        image_url,
        created_at: Utc::now(),
    };

    let id = match store
        .add_document(collections::GROUPS, into_fields(&document)?)
        .await
    {
        Ok(id) => id,
        Err(e) => {
            if let Some(url) = &document.image_url {
                warn!("Group creation failed, image left orphaned at {}", url);
            }
            return Err(e);
        }
    };
    info!("Group created: id={}, name={}", id, document.name);
    Ok(id)
}

pub async fn create_session<S>(store: &S, request: CreateSessionRequest) -> StudyResult<String>
where
    S: DocumentStore + ?Sized,
{
    require(&request.session_name, "Session name")?;
    require(&request.group_name, "Group name")?;

    let id = store
        .add_document(collections::SESSIONS, into_fields(&request)?)
        .await?;
    info!("Session created: id={}, group={}", id, request.group_name);
    Ok(id)
}

/// Writes the profile document for a freshly registered user.
pub async fn register_profile<S>(store: &S, user_id: &str, request: RegisterProfileRequest) -> StudyResult<()>
where
    S: DocumentStore + ?Sized,
{
    require(user_id, "User id")?;
    require(&request.name, "Name")?;
    validate_email(&request.email)?;

    let mut document = into_fields(&request)?;
    document.insert(fields::LOCATION_VISIBLE.to_string(), Value::Bool(true));
    store
        .set_document(collections::USERS, user_id, document)
        .await
}

pub async fn update_profile<S>(store: &S, user_id: &str, request: UpdateProfileRequest) -> StudyResult<()>
where
    S: DocumentStore + ?Sized,
{
    if request.is_empty() {
        return Err(StudyError::Validation("Nothing to update".to_string()));
    }
    if let Some(name) = &request.name {
        require(name, "Name")?;
    }
    if let Some(email) = &request.email {
        validate_email(email)?;
    }

    let mut changes = into_fields(&request)?;
    if request.location.is_some() {
        // Stored coordinates take precedence over location text.
        for field in [fields::LATITUDE, fields::LONGITUDE, fields::COORDINATE] {
            changes.insert(field.to_string(), Value::Null);
        }
    }

    store
        .update_document(collections::USERS, user_id, changes)
        .await
}

pub async fn get_profile<S>(store: &S, user_id: &str) -> StudyResult<UserProfile>
where
    S: DocumentStore + ?Sized,
{
    store
        .get_document(collections::USERS, user_id)
        .await?
        .map(|record| UserProfile::from_record(&record))
        .ok_or_else(|| StudyError::NotFound(format!("Profile {} not found", user_id)))
}

/// Uploads a note or recording and records its metadata.
pub async fn upload_user_file<S, B>(
    store: &S,
    storage: &B,
    user_id: &str,
    kind: FileKind,
    file_name: &str,
    bytes: Vec<u8>,
) -> StudyResult<StoredFile>
where
    S: DocumentStore + ?Sized,
    B: BlobStorage + ?Sized,
{
    require(user_id, "User id")?;
    require(file_name, "File name")?;

    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .unwrap_or(kind.default_extension())
        .to_lowercase();
    let path = format!("{}/{}.{}", kind.storage_prefix(), Uuid::new_v4(), extension);

    storage.put_blob(&path, bytes).await?;

    let document = NewFileDocument {
        user_id: user_id.to_string(),
        file_url: path,
        file_name: file_name.to_string(),
        created_at: Utc::now(),
    };
    let id = store
        .add_document(kind.collection(), into_fields(&document)?)
        .await?;

    Ok(StoredFile {
        id,
        user_id: document.user_id,
        file_name: document.file_name,
        file_url: document.file_url,
        created_at: document.created_at,
        kind,
    })
}

/// Newest first. Records without `createdAt` are stamped with `fetched_at`.
pub async fn list_user_files<S>(
    store: &S,
    user_id: &str,
    kind: FileKind,
    fetched_at: DateTime<Utc>,
) -> StudyResult<Vec<StoredFile>>
where
    S: DocumentStore + ?Sized,
{
    let query = Query::new()
        .where_eq(fields::USER_ID, user_id)
        .order_by(fields::CREATED_AT, Direction::Descending);
    let records: Vec<Record> = store.fetch_collection(kind.collection(), &query).await?;

    Ok(records
        .iter()
        .map(|record| StoredFile::from_record(record, kind, fetched_at))
        .collect())
}

pub async fn download_user_file<B>(storage: &B, file: &StoredFile) -> StudyResult<Vec<u8>>
where
    B: BlobStorage + ?Sized,
{
    storage.get_blob(&file.file_url).await
}
