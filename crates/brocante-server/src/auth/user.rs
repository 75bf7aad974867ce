//! Account service

use chrono::Local;
use sea_orm::*;

use brocante_common::Role;
use brocante_common::error::BrocanteError;
use brocante_persistence::entity::user;

/// Authenticate a username/password pair
pub async fn login(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> anyhow::Result<user::Model> {
    let Some(account) = user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?
    else {
        return Err(BrocanteError::UserNotExist(username.to_string()).into());
    };

    if !account.enabled {
        return Err(BrocanteError::AuthError(format!("user '{}' is disabled", username)).into());
    }

    if !bcrypt::verify(password, &account.password).unwrap_or(false) {
        return Err(BrocanteError::BadCredentials.into());
    }

    Ok(account)
}

/// Create a new account with the default role
pub async fn register(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
    email: Option<&str>,
) -> anyhow::Result<user::Model> {
    brocante_api::validation::validate_username(username)
        .map_err(|e| BrocanteError::IllegalArgument(e.code.to_string()))?;
    brocante_api::validation::validate_password(password)
        .map_err(|e| BrocanteError::IllegalArgument(e.code.to_string()))?;

    let duplicate = user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?;
    if duplicate.is_some() {
        return Err(BrocanteError::UserAlreadyExist(username.to_string()).into());
    }

    let hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| BrocanteError::InternalError(e.to_string()))?;

    let entity = user::ActiveModel {
        username: Set(username.to_string()),
        password: Set(hash),
        email: Set(email.map(str::to_string)),
        role: Set(Role::User.as_str().to_string()),
        enabled: Set(true),
        created_at: Set(Local::now().naive_local()),
        ..Default::default()
    };

    let model = user::Entity::insert(entity).exec_with_returning(db).await?;

    tracing::info!(username, "Account created");

    Ok(model)
}

/// Resolve a stored role string; unknown values demote to the basic role
pub fn role_of(account: &user::Model) -> Role {
    account.role.parse().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_of_falls_back_to_user() {
        let account = user::Model {
            id: 1,
            username: "x".to_string(),
            password: String::new(),
            email: None,
            role: "superuser".to_string(),
            enabled: true,
            created_at: chrono::NaiveDateTime::default(),
        };
        assert_eq!(role_of(&account), Role::User);

        let mut admin = account.clone();
        admin.role = "admin".to_string();
        assert_eq!(role_of(&admin), Role::Admin);
    }
}
