//! Example models, their hooks, and the scripted walk through both services.

use std::sync::Arc;

use hexkit_adapter_memory::{
    MemoryModelRepository, MemoryTenantRepository, MemoryTenantedModelRepository,
};
use hexkit_app::id_generator::{RandomIds, SequentialIds};
use hexkit_app::services::{
    Change, ModelHooks, ModelService, ServiceConfig, TenantedModelHooks, TenantedModelService,
};
use hexkit_domain::error::{Failure, Outcome};
use hexkit_domain::model::{Model, TenantedModel};
use hexkit_domain::page::PageRequest;
use tokio_util::sync::CancellationToken;

hexkit_domain::define_id!(
    /// Identifier of a support ticket.
    TicketId
);

/// Global label shared by every tenant.
#[derive(Debug, Clone)]
pub struct Tag {
    pub id: u64,
    pub name: String,
}

impl Model for Tag {
    type Id = u64;

    fn id(&self) -> &u64 {
        &self.id
    }

    fn assign_id(&mut self, id: u64) {
        self.id = id;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketState {
    Open,
    Closed,
}

/// Support ticket owned by one tenant.
#[derive(Debug, Clone)]
pub struct Ticket {
    pub id: TicketId,
    pub tenant: String,
    pub title: String,
    pub state: TicketState,
}

impl Ticket {
    fn draft(tenant: &str, title: &str) -> Self {
        Self {
            id: TicketId::nil(),
            tenant: tenant.to_string(),
            title: title.to_string(),
            state: TicketState::Open,
        }
    }
}

impl Model for Ticket {
    type Id = TicketId;

    fn id(&self) -> &TicketId {
        &self.id
    }

    fn assign_id(&mut self, id: TicketId) {
        self.id = id;
    }
}

impl TenantedModel for Ticket {
    type TenantId = String;

    fn tenant_id(&self) -> &String {
        &self.tenant
    }
}

struct TagHooks;

impl ModelHooks<Tag> for TagHooks {
    async fn mutate(
        &self,
        tag: &mut Tag,
        _change: Change,
        _cancel: &CancellationToken,
    ) -> Outcome<()> {
        tag.name = tag.name.trim().to_lowercase().replace(' ', "-");
        Ok(())
    }

    async fn validate_create(&self, tag: &Tag, _cancel: &CancellationToken) -> Outcome<()> {
        if tag.name.is_empty() {
            return Err(Failure::bad_request("tag name must not be empty"));
        }
        Ok(())
    }

    async fn on_created(&self, tag: &Tag, _cancel: &CancellationToken) {
        tracing::info!(id = tag.id, name = %tag.name, "tag created");
    }
}

struct TicketHooks;

impl TenantedModelHooks<Ticket> for TicketHooks {
    async fn mutate(
        &self,
        _tenant: &String,
        ticket: &mut Ticket,
        _change: Change,
        _cancel: &CancellationToken,
    ) -> Outcome<()> {
        ticket.title = ticket.title.trim().to_string();
        Ok(())
    }

    async fn validate_create(
        &self,
        _tenant: &String,
        ticket: &Ticket,
        _cancel: &CancellationToken,
    ) -> Outcome<()> {
        if ticket.title.is_empty() {
            return Err(Failure::bad_request("ticket title must not be empty"));
        }
        if ticket.state == TicketState::Closed {
            return Err(Failure::bad_request("tickets must be opened before closing"));
        }
        Ok(())
    }

    async fn on_created(&self, tenant: &String, ticket: &Ticket, _cancel: &CancellationToken) {
        tracing::info!(%tenant, id = %ticket.id, title = %ticket.title, "ticket opened");
    }

    async fn on_changed(&self, tenant: &String, ticket: &Ticket, _cancel: &CancellationToken) {
        tracing::info!(%tenant, id = %ticket.id, state = ?ticket.state, "ticket change hook fired");
    }

    async fn on_removed(&self, tenant: &String, id: &TicketId, _cancel: &CancellationToken) {
        tracing::info!(%tenant, %id, "ticket removed");
    }
}

type Tenants = Arc<MemoryTenantRepository<String>>;

/// Wire the services over fresh in-memory stores and exercise them.
///
/// Expected rejections are logged; only unexpected failures abort.
///
/// # Errors
///
/// Returns the first failure the script did not anticipate.
pub async fn run(config: ServiceConfig, tenant_names: &[String]) -> Outcome<()> {
    let cancel = CancellationToken::new();
    let tenants: Tenants = Arc::new(MemoryTenantRepository::with_tenants(
        tenant_names.iter().cloned(),
    ));

    let tags: ModelService<Tag, _, _> =
        ModelService::new(MemoryModelRepository::new(SequentialIds::new()))
            .with_hooks(TagHooks)
            .with_config(config.clone());
    let tickets: TenantedModelService<Ticket, _, _, _> = TenantedModelService::new(
        Arc::clone(&tenants),
        MemoryTenantedModelRepository::new(RandomIds),
    )
    .with_hooks(TicketHooks)
    .with_config(config);

    for name in ["Billing", " Login Issue "] {
        tags.create(Tag { id: 0, name: name.to_string() }, &cancel).await?;
    }
    report("blank tag", tags.create(Tag { id: 0, name: "  ".to_string() }, &cancel).await);
    let listed = tags.list(&PageRequest::default(), &cancel).await?;
    tracing::info!(total = listed.total, "tags listed");

    let Some(owner) = tenant_names.first() else {
        return Err(Failure::bad_request("no tenant configured"));
    };

    let opened = tickets
        .create(owner, Ticket::draft(owner, "  Cannot log in "), &cancel)
        .await?;
    let closed = tickets
        .update(
            owner,
            Ticket {
                state: TicketState::Closed,
                ..opened.clone()
            },
            &cancel,
        )
        .await?;
    tracing::info!(id = %closed.id, state = ?closed.state, "ticket updated");

    report(
        "ticket for another tenant",
        tickets
            .create(owner, Ticket::draft("somebody-else", "sneaky"), &cancel)
            .await,
    );
    report(
        "update of unknown ticket",
        tickets.update(owner, Ticket::draft(owner, "ghost"), &cancel).await,
    );

    tickets.delete(owner, &TicketId::new(), &cancel).await?;
    tracing::info!("deleting an unknown ticket succeeded");

    let page = tickets.list(owner, &PageRequest::default(), &cancel).await?;
    tracing::info!(%owner, total = page.total, "tickets listed");

    tenants.deactivate(owner)?;
    report(
        "delete for deactivated tenant",
        tickets.delete(owner, &opened.id, &cancel).await,
    );
    report(
        "lookup for unknown tenant",
        tickets.get(&"nobody".to_string(), &opened.id, &cancel).await.map(|_| ()),
    );

    tenants.register(owner.clone())?;
    tickets.delete(owner, &opened.id, &cancel).await?;
    Ok(())
}

fn report<T>(step: &str, result: Outcome<T>) {
    match result {
        Ok(_) => tracing::warn!(step, "expected a rejection but the call succeeded"),
        Err(err) => tracing::info!(
            step,
            status = %err.status(),
            application_id = err.application_id(),
            error = %err,
            "rejected as expected"
        ),
    }
}
