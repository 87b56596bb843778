use crate::auth::password::{hash_password, verify_password};
use crate::error::ApiError;
use crate::users::dto::UserUpdate;
use crate::users::repo::{InsertUserError, User, UserChanges, UserStore};

/// Authenticate by email and password. Unknown email and wrong password
/// fail identically so the response never reveals which one was wrong.
pub async fn login(store: &dyn UserStore, email: &str, password: &str) -> Result<User, ApiError> {
    let user = store
        .find_by_email(email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;
    if !verify_password(password, &user.password_hash) {
        return Err(ApiError::InvalidCredentials);
    }
    Ok(user)
}

pub async fn register(
    store: &dyn UserStore,
    name: &str,
    email: &str,
    password: &str,
) -> Result<User, ApiError> {
    if store.find_by_email(email).await?.is_some() {
        return Err(ApiError::EmailAlreadyExists);
    }
    let hash = hash_password(password)?;
    let user = store.insert(name, email, &hash).await.map_err(|e| match e {
        InsertUserError::DuplicateEmail => ApiError::EmailAlreadyExists,
        InsertUserError::Other(e) => ApiError::Unexpected(e),
    })?;
    Ok(user)
}

pub async fn get_by_id(store: &dyn UserStore, id: i64) -> Result<User, ApiError> {
    store.find_by_id(id).await?.ok_or(ApiError::NotFound)
}

pub async fn list_all(store: &dyn UserStore) -> Result<Vec<User>, ApiError> {
    Ok(store.list_all().await?)
}

/// Apply only the provided fields; a new password is re-hashed before it
/// is stored. Email uniqueness is not re-checked here, matching creation
/// being the only guarded path.
pub async fn update_by_id(
    store: &dyn UserStore,
    id: i64,
    patch: UserUpdate,
) -> Result<User, ApiError> {
    let user = store.find_by_id(id).await?.ok_or(ApiError::NotFound)?;
    let password_hash = match patch.password.as_deref() {
        Some(plain) => Some(hash_password(plain)?),
        None => None,
    };
    let changes = UserChanges {
        name: patch.name,
        email: patch.email,
        password_hash,
    };
    Ok(store.update(&user, changes).await?)
}

pub async fn delete_by_id(store: &dyn UserStore, id: i64) -> Result<(), ApiError> {
    let user = store.find_by_id(id).await?.ok_or(ApiError::NotFound)?;
    store.delete(&user).await?;
    Ok(())
}
