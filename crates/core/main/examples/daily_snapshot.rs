//! Takes two daily snapshots of a small in-memory platform and prints the
//! admin dashboard.
//!
//! Run with: cargo run --example daily_snapshot

use chrono::Utc;
use shiftdesk::prelude::*;
use shiftdesk_adapter_memory::MemoryAdapter;

#[tokio::main]
async fn main() -> PlatformResult<()> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    let adapter = Arc::new(MemoryAdapter::new());
    let analytics =
        AnalyticsService::new(adapter.clone()).with_policy(SnapshotPolicy::ReplaceDaily);
    analytics.migrate().await?;

    adapter
        .create_company(&Company::new("acme", "Acme Staffing").with_plan("pro"))
        .await?;
    adapter
        .create_company(&Company::new("globex", "Globex Retail").with_plan("trial"))
        .await?;
    adapter
        .create_user(
            &User::new("u_owner", "owner@acme.test", Role::SuperAdmin).with_company("acme"),
        )
        .await?;
    adapter
        .create_user(&User::new("u_branch", "north@acme.test", Role::Admin).with_company("acme"))
        .await?;
    adapter
        .create_user(&User::new("u_ann", "ann@acme.test", Role::Employee).with_company("acme"))
        .await?;

    let snapshot = analytics.create_daily_snapshot().await?;
    println!(
        "Snapshot {}: {} companies, {} employees, plans {:?}",
        snapshot.date.date_naive(),
        snapshot.total_companies,
        snapshot.total_employees,
        snapshot.subscription_breakdown
    );

    // A second run on the same day replaces the first under ReplaceDaily.
    adapter
        .create_user(&User::new("u_bob", "bob@acme.test", Role::Employee).with_company("acme"))
        .await?;
    let replaced = analytics.create_daily_snapshot().await?;
    println!("Replaced {}: {} employees", replaced.id, replaced.total_employees);

    let admin = AdminApi::new(AdminConfig::default(), analytics);
    let dashboard = admin.dashboard(7, Utc::now()).await?;
    println!("{}", serde_json::to_string_pretty(&dashboard)?);

    Ok(())
}
