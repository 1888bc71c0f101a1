use crate::infra::{parse_amount, seeded_services, Services};
use calculette::clients::{ClientId, CommercialConfigLookup, CommercialImporter, ImportSummary};
use calculette::config::{AppConfig, SeedConfig};
use calculette::error::AppError;
use calculette::margin::{
    ClientCommercialConfig, GlobalCostParameters, MarginSimulationRequest,
    MarginSimulationResult, ResourceCostProfile, ResourceKind,
};
use calculette::simulation::NewScenario;
use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::path::PathBuf;

const CLI_CLIENT_ID: &str = "cli-client";

#[derive(Args, Debug)]
pub(crate) struct SimulateArgs {
    /// Annual gross salary of a salaried resource
    #[arg(
        long,
        value_parser = parse_amount,
        conflicts_with = "hourly_rate",
        required_unless_present = "hourly_rate"
    )]
    pub(crate) salary: Option<Decimal>,
    /// Hourly rate of a freelance resource
    #[arg(long, value_parser = parse_amount, required_unless_present = "salary")]
    pub(crate) hourly_rate: Option<Decimal>,
    /// Hours planned on the assignment
    #[arg(long, value_parser = parse_amount, default_value = "1")]
    pub(crate) planned_hours: Decimal,
    /// Net hourly rate proposed to the client
    #[arg(long, value_parser = parse_amount)]
    pub(crate) proposed_rate: Decimal,
    /// Commercial parameters export to read the client from
    #[arg(long)]
    pub(crate) client_csv: Option<PathBuf>,
    /// Client to simulate for when reading from a CSV export
    #[arg(long, default_value = CLI_CLIENT_ID)]
    pub(crate) client_id: String,
    /// Client target margin (%)
    #[arg(long, value_parser = parse_amount)]
    pub(crate) target_margin: Option<Decimal>,
    /// Client minimum margin (%)
    #[arg(long, value_parser = parse_amount)]
    pub(crate) minimum_margin: Option<Decimal>,
    /// Client discount (%)
    #[arg(long, value_parser = parse_amount)]
    pub(crate) discount: Option<Decimal>,
    /// Forced vacation days per year imposed by the client
    #[arg(long)]
    pub(crate) vacation_days: Option<u32>,
    /// Client target hourly rate, net of discount
    #[arg(long, value_parser = parse_amount)]
    pub(crate) target_rate: Option<Decimal>,
    /// Override the configured employer charges (%)
    #[arg(long, value_parser = parse_amount)]
    pub(crate) employer_charges: Option<Decimal>,
    /// Override the configured indirect annual costs
    #[arg(long, value_parser = parse_amount)]
    pub(crate) indirect_costs: Option<Decimal>,
    /// Override the configured billable hours per year
    #[arg(long)]
    pub(crate) billable_hours: Option<u32>,
    /// Print the result as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

impl SimulateArgs {
    fn resource_profile(&self) -> ResourceCostProfile {
        match (self.salary, self.hourly_rate) {
            (Some(salary), _) => ResourceCostProfile::salaried(salary),
            (None, Some(rate)) => ResourceCostProfile::freelance(rate),
            (None, None) => ResourceCostProfile {
                kind: ResourceKind::Freelance,
                annual_gross_salary: None,
                hourly_rate: None,
            },
        }
    }

    fn commercial(&self) -> ClientCommercialConfig {
        ClientCommercialConfig {
            target_margin_percent: self.target_margin,
            minimum_margin_percent: self.minimum_margin,
            discount_percent: self.discount,
            forced_vacation_days_per_year: self.vacation_days,
            target_hourly_rate: self.target_rate,
        }
    }

    fn cost_parameters(&self, configured: &GlobalCostParameters) -> GlobalCostParameters {
        GlobalCostParameters {
            employer_charges_rate_percent: self
                .employer_charges
                .unwrap_or(configured.employer_charges_rate_percent),
            indirect_annual_costs: self
                .indirect_costs
                .unwrap_or(configured.indirect_annual_costs),
            billable_hours_per_year: self
                .billable_hours
                .unwrap_or(configured.billable_hours_per_year),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    /// Commercial parameters export (CSV)
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print the import summary as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Hours planned on each sample assignment
    #[arg(long, value_parser = parse_amount, default_value = "160")]
    pub(crate) planned_hours: Decimal,
}

pub(crate) fn run_simulate(args: SimulateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let seed = SeedConfig {
        cost_parameters: args.cost_parameters(&config.seed.cost_parameters),
        clients_csv: args.client_csv.clone(),
    };
    let services = seeded_services(&seed)?;

    if args.client_csv.is_none() {
        services
            .clients
            .update(ClientId(args.client_id.clone()), None, args.commercial())?;
    }

    let request = MarginSimulationRequest {
        resource_profile: args.resource_profile(),
        planned_hours: args.planned_hours,
        client_id: args.client_id.clone(),
        proposed_bill_rate: args.proposed_rate,
    };
    let result = services.simulation.simulate(&request)?;

    if args.json {
        let rendered = serde_json::to_string_pretty(&result).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        for line in result_lines(&request, &result) {
            println!("{line}");
        }
    }

    Ok(())
}

pub(crate) fn run_import(args: ImportArgs) -> Result<(), AppError> {
    let batch = CommercialImporter::from_path(&args.csv)?;
    let services = Services::in_memory();
    let summary = services.clients.apply_batch(batch)?;

    if args.json {
        let rendered = serde_json::to_string_pretty(&summary).map_err(std::io::Error::from)?;
        println!("{rendered}");
        return Ok(());
    }

    println!("Commercial parameters import: {}", args.csv.display());
    for line in summary_lines(&summary) {
        println!("{line}");
    }

    println!("\nClients");
    for client in services.clients.list()? {
        match client.lookup() {
            CommercialConfigLookup::Complete(_) => {
                println!("- {} ({}): ready for simulation", client.id.0, client.name);
            }
            CommercialConfigLookup::Incomplete { missing_fields } => {
                let names: Vec<&str> = missing_fields.iter().map(|field| field.name()).collect();
                println!(
                    "- {} ({}): incomplete, missing {}",
                    client.id.0,
                    client.name,
                    names.join(", ")
                );
            }
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let services = seeded_services(&SeedConfig {
        cost_parameters: config.seed.cost_parameters.clone(),
        clients_csv: None,
    })?;

    for (id, name, commercial) in sample_clients() {
        services
            .clients
            .update(ClientId(id.to_string()), Some(name.to_string()), commercial)?;
    }

    let parameters = &config.seed.cost_parameters;
    println!("Margin simulation demo");
    println!(
        "Active cost parameters: {}% employer charges | {} indirect per year | {} billable hours",
        parameters.employer_charges_rate_percent,
        parameters.indirect_annual_costs,
        parameters.billable_hours_per_year
    );

    let resources = [
        ResourceCostProfile::salaried(dec!(75000)),
        ResourceCostProfile::freelance(dec!(95)),
    ];
    let proposals = [dec!(100), dec!(115), dec!(130)];

    for client_id in ["acme", "initech", "globex"] {
        println!();
        let lookup = services
            .clients
            .commercial_config(&ClientId(client_id.to_string()))?;
        if let CommercialConfigLookup::Incomplete { missing_fields } = lookup {
            let names: Vec<&str> = missing_fields.iter().map(|field| field.name()).collect();
            println!(
                "Client {client_id}: simulation blocked, complete {} first",
                names.join(", ")
            );
            continue;
        }

        for resource in &resources {
            for proposed in proposals {
                let request = MarginSimulationRequest {
                    resource_profile: resource.clone(),
                    planned_hours: args.planned_hours,
                    client_id: client_id.to_string(),
                    proposed_bill_rate: proposed,
                };
                let result = services.simulation.simulate(&request)?;
                for line in result_lines(&request, &result) {
                    println!("{line}");
                }
            }
        }
    }

    let scenario = services.simulation.save_scenario(NewScenario {
        name: "Acme senior consultant".to_string(),
        request: MarginSimulationRequest {
            resource_profile: ResourceCostProfile::salaried(dec!(75000)),
            planned_hours: args.planned_hours,
            client_id: "acme".to_string(),
            proposed_bill_rate: dec!(115),
        },
    })?;
    println!(
        "\nSaved scenario {} '{}' -> proposed margin {}% ({})",
        scenario.id.0,
        scenario.name,
        scenario.result.proposed.margin_percent,
        scenario.result.proposed.status
    );

    Ok(())
}

fn sample_clients() -> Vec<(&'static str, &'static str, ClientCommercialConfig)> {
    vec![
        (
            "acme",
            "Acme Corp",
            ClientCommercialConfig {
                target_margin_percent: Some(dec!(25)),
                minimum_margin_percent: Some(dec!(15)),
                discount_percent: Some(dec!(10)),
                forced_vacation_days_per_year: Some(5),
                target_hourly_rate: Some(dec!(120)),
            },
        ),
        (
            "initech",
            "Initech",
            ClientCommercialConfig {
                target_margin_percent: Some(dec!(30)),
                minimum_margin_percent: Some(dec!(20)),
                discount_percent: Some(Decimal::ZERO),
                forced_vacation_days_per_year: Some(0),
                target_hourly_rate: Some(dec!(135)),
            },
        ),
        (
            "globex",
            "Globex",
            ClientCommercialConfig {
                target_margin_percent: Some(dec!(22)),
                minimum_margin_percent: Some(dec!(12)),
                ..ClientCommercialConfig::default()
            },
        ),
    ]
}

fn resource_label(profile: &ResourceCostProfile) -> String {
    match (profile.kind, profile.annual_gross_salary, profile.hourly_rate) {
        (ResourceKind::Salaried, Some(salary), _) => format!("salaried {salary}/year"),
        (ResourceKind::Freelance, _, Some(rate)) => format!("freelance {rate}/h"),
        (ResourceKind::Salaried, _, _) => "salaried".to_string(),
        (ResourceKind::Freelance, _, _) => "freelance".to_string(),
    }
}

pub(crate) fn result_lines(
    request: &MarginSimulationRequest,
    result: &MarginSimulationResult,
) -> Vec<String> {
    let target = &result.target;
    let proposed = &result.proposed;
    let gross = target
        .gross_target_bill_rate
        .map(|rate| format!("gross {rate}"))
        .unwrap_or_else(|| "gross n/a".to_string());

    vec![
        format!(
            "Client {} | {} | {} h",
            request.client_id,
            resource_label(&request.resource_profile),
            result.totals.planned_hours
        ),
        format!("  Hourly cost      {}", target.cost_per_hour),
        format!(
            "  Target rate      {} ({gross}) | margin {}% | {}/h | {}",
            target.effective_target_bill_rate,
            target.theoretical_margin_percent,
            target.theoretical_margin_per_hour,
            target.status
        ),
        format!(
            "  Proposed rate    {} (discount {}%) | margin {}% | {}/h | {} | {:+} pts vs target",
            proposed.proposed_bill_rate,
            proposed.discount_percent_applied,
            proposed.margin_percent,
            proposed.margin_per_hour,
            proposed.status,
            result.margin_delta_points
        ),
        format!(
            "  Totals           cost {} | revenue {} | margin {}",
            result.totals.total_cost, result.totals.total_revenue, result.totals.total_margin
        ),
    ]
}

fn summary_lines(summary: &ImportSummary) -> Vec<String> {
    let mut lines = vec![format!(
        "- {} created | {} updated | {} rejected",
        summary.created,
        summary.updated,
        summary.rejected.len()
    )];
    for rejection in &summary.rejected {
        let client = rejection.client_id.as_deref().unwrap_or("?");
        lines.push(format!(
            "  line {} ({client}): {}",
            rejection.line, rejection.reason
        ));
    }
    lines
}
