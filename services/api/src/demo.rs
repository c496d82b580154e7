use std::sync::Arc;

use agentcast::broadcast::matching::BroadcastCriteria;
use agentcast::broadcast::preferences::{
    AgentId, BroadcastCategory, CoverageArea, CoverageRepository, NotificationPreference,
    PreferenceService, PriceRangePreference,
};
use agentcast::broadcast::service::{BroadcastRequest, BroadcastService};
use agentcast::broadcast::CoverageSelection;
use agentcast::error::AppError;
use agentcast::onboarding::OnboardingState;
use clap::Args;

use crate::infra::{
    InMemoryAgentDirectory, InMemoryCoverageRepository, InMemoryJobQueue,
    InMemoryPreferenceRepository,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Narrow the demo broadcast to this minimum price (e.g. 450000 or $450,000)
    #[arg(long, value_parser = crate::infra::parse_price_arg)]
    pub(crate) min_price: Option<u32>,
    /// Narrow the demo broadcast to this maximum price
    #[arg(long, value_parser = crate::infra::parse_price_arg)]
    pub(crate) max_price: Option<u32>,
    /// Only preview the match; skip queueing delivery jobs
    #[arg(long)]
    pub(crate) preview: bool,
    /// Skip the onboarding walk-through portion of the demo
    #[arg(long)]
    pub(crate) skip_onboarding: bool,
}

struct DemoAgent {
    id: &'static str,
    email: &'static str,
    categories: &'static [BroadcastCategory],
    coverage: fn(AgentId) -> Vec<CoverageArea>,
    price_range: PriceRangePreference,
}

fn demo_agents() -> Vec<DemoAgent> {
    vec![
        DemoAgent {
            id: "amara",
            email: "amara@northshore.example",
            categories: &[BroadcastCategory::BuyerNeed, BroadcastCategory::SalesIntel],
            coverage: |id| vec![CoverageArea::county(id, "MA", "Suffolk")],
            price_range: PriceRangePreference::default(),
        },
        DemoAgent {
            id: "ben",
            email: "ben@metrowest.example",
            categories: &[BroadcastCategory::BuyerNeed],
            coverage: |id| {
                vec![
                    CoverageArea::city(id.clone(), "MA", "Cambridge"),
                    CoverageArea::city(id, "MA", "Somerville"),
                ]
            },
            price_range: PriceRangePreference {
                min_price: Some(300_000),
                max_price: Some(650_000),
                ..PriceRangePreference::default()
            },
        },
        DemoAgent {
            id: "carla",
            email: "carla@hartfordhomes.example",
            categories: &[BroadcastCategory::BuyerNeed, BroadcastCategory::RenterNeed],
            coverage: |id| vec![CoverageArea::county(id, "CT", "Hartford")],
            price_range: PriceRangePreference {
                min_price: None,
                max_price: Some(500_000),
                has_no_min: true,
                has_no_max: false,
            },
        },
        DemoAgent {
            id: "devon",
            email: "devon@capecod.example",
            categories: &[BroadcastCategory::GeneralDiscussion],
            coverage: |id| vec![CoverageArea::county(id, "MA", "Barnstable")],
            price_range: PriceRangePreference::default(),
        },
    ]
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Broadcast targeting demo");

    if !args.skip_onboarding {
        let mut session = OnboardingState::new();
        let mut walk = vec![session.stage().label()];
        while !session.stage().is_complete() {
            session = session.advanced();
            walk.push(session.stage().label());
        }
        println!("\nOnboarding stages: {}", walk.join(" -> "));
    }

    let repository = Arc::new(InMemoryPreferenceRepository::default());
    let coverage = Arc::new(InMemoryCoverageRepository::default());
    let directory = Arc::new(InMemoryAgentDirectory::default());
    let queue = Arc::new(InMemoryJobQueue::default());

    let preferences = PreferenceService::new(repository.clone());
    let broadcasts = BroadcastService::new(
        repository.clone(),
        coverage.clone(),
        directory.clone(),
        queue.clone(),
    );

    println!("\nSeeding {} demo agents", demo_agents().len());
    for agent in demo_agents() {
        let agent_id = AgentId(agent.id.to_string());
        directory.register(agent_id.clone(), agent.email);

        let mut preference = NotificationPreference::empty(agent_id.clone());
        for category in agent.categories {
            preference.set_subscription(*category, true);
        }
        preference.price_range = agent.price_range.clone();
        preferences.upsert(preference)?;

        let rows = (agent.coverage)(agent_id.clone());
        coverage
            .replace_for(&agent_id, rows)
            .map_err(agentcast::broadcast::service::BroadcastError::from)?;
        println!("  {} <{}>", agent.id, agent.email);
    }

    // Build the broadcast filter the way the UI does: a coverage selection
    // narrowed to Middlesex county, then derived into criteria.
    let mut selection = CoverageSelection::new("MA");
    selection.select_county("Middlesex");
    selection.toggle_town("Cambridge");
    selection.toggle_town("Somerville");

    let mut criteria = BroadcastCriteria::from_selection(&selection);
    criteria.min_price = args.min_price;
    criteria.max_price = args.max_price;

    let sender = AgentId("amara".to_string());
    let request = BroadcastRequest {
        category: BroadcastCategory::BuyerNeed,
        subject: "Buyer need: 3BR in Cambridge or Somerville".to_string(),
        message: "Pre-approved buyer relocating in October; flexible on closing.".to_string(),
        criteria: Some(criteria),
        reply_to: Some("amara@northshore.example".to_string()),
        send_copy_to_self: !args.preview,
        preview_only: args.preview,
    };

    println!(
        "\nBroadcasting '{}' as {} ({})",
        request.subject,
        sender.0,
        if args.preview { "preview" } else { "send" }
    );
    let response = broadcasts.broadcast(&sender, request)?;

    println!("  matched recipients: {}", response.recipient_count);
    if let Some(queued) = response.queued {
        println!("  jobs queued: {queued}");
    }
    if let Some(message) = &response.message {
        println!("  note: {message}");
    }

    for batch in queue.batches() {
        println!("\nQueued batch ({} job(s)):", batch.len());
        for job in batch {
            let marker = if job.is_sender_copy { " [sender copy]" } else { "" };
            println!("  -> {}{}", job.recipient_email, marker);
        }
    }

    Ok(())
}
