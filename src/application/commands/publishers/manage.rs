use super::PublisherCommandService;
use crate::{
    application::{
        authorization::ensure_allowed,
        dto::{AuthenticatedUser, PublisherDto},
        error::ApplicationResult,
    },
    domain::{
        authorization::{Action, Resource},
        publisher::{NewPublisher, PublisherId, PublisherName, PublisherUpdate, Website},
    },
};
use chrono::NaiveDate;

pub struct CreatePublisherCommand {
    pub name: String,
    pub description: String,
    pub website: Option<String>,
    pub established_date: Option<NaiveDate>,
}

pub struct UpdatePublisherCommand {
    pub id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
    /// `Some("")` clears the website.
    pub website: Option<String>,
    pub established_date: Option<Option<NaiveDate>>,
}

impl PublisherCommandService {
    /// The creating publisher-role user becomes the owner.
    pub async fn create_publisher(
        &self,
        actor: &AuthenticatedUser,
        command: CreatePublisherCommand,
    ) -> ApplicationResult<PublisherDto> {
        ensure_allowed(actor, Action::Create, Resource::NewPublisher, "publishers")?;

        let website = match command.website {
            Some(raw) => Website::parse(raw)?,
            None => None,
        };
        let created = self
            .publisher_repo
            .insert(NewPublisher {
                name: PublisherName::new(command.name)?,
                description: command.description.trim().to_string(),
                website,
                established_date: command.established_date,
                owner_id: actor.id,
                created_at: self.clock.now(),
            })
            .await?;

        tracing::info!(publisher_id = %created.id, owner_id = %actor.id, "publisher created");
        Ok(created.into())
    }

    pub async fn update_publisher(
        &self,
        actor: &AuthenticatedUser,
        command: UpdatePublisherCommand,
    ) -> ApplicationResult<PublisherDto> {
        let publisher = self.load_publisher(PublisherId::new(command.id)?).await?;
        ensure_allowed(actor, Action::Update, Resource::Publisher(&publisher), "this publisher")?;

        let mut update = PublisherUpdate::new(publisher.id, self.clock.now());
        if let Some(name) = command.name {
            update = update.with_name(PublisherName::new(name)?);
        }
        if let Some(description) = command.description {
            update = update.with_description(description.trim().to_string());
        }
        if let Some(website) = command.website {
            update = update.with_website(Website::parse(website)?);
        }
        if let Some(date) = command.established_date {
            update = update.with_established_date(date);
        }
        if update.is_empty() {
            return Ok(publisher.into());
        }

        Ok(self.publisher_repo.update(update).await?.into())
    }
}
