use super::UserCommandService;
use crate::{
    application::{
        dto::UserDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{EmailAddress, NewUser, Role, Username},
};

pub struct RegisterUserCommand {
    pub username: String,
    pub email: Option<String>,
    pub role: Option<Role>,
}

impl UserCommandService {
    /// Self-service sign-up. The role chosen here is permanent.
    pub async fn register(&self, command: RegisterUserCommand) -> ApplicationResult<UserDto> {
        let username = Username::new(command.username)?;
        let email = command
            .email
            .filter(|raw| !raw.trim().is_empty())
            .map(EmailAddress::new)
            .transpose()?;
        let role = command.role.unwrap_or_default();

        if self.user_repo.find_by_username(&username).await?.is_some() {
            return Err(ApplicationError::conflict("username already exists"));
        }

        let user = self
            .user_repo
            .insert(NewUser {
                username,
                email,
                role,
                created_at: self.clock.now(),
            })
            .await?;
        tracing::info!(user_id = %user.id, role = %user.role, "user registered");
        Ok(user.into())
    }
}
