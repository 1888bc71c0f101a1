use super::common::*;
use crate::margin::{MarginError, MarginStatus, ResourceCostProfile};
use crate::memory::{InMemoryClientRepository, InMemoryCostParameterRepository};
use crate::simulation::{
    MarginSimulationService, NewScenario, ScenarioId, SimulationServiceError,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

#[test]
fn simulate_uses_stored_config_and_active_parameters() {
    let service = seeded_simulation_service();
    let mut request = freelance_request("acme");
    request.resource_profile = ResourceCostProfile::salaried(dec!(75000));

    let result = service.simulate(&request).expect("simulation");

    assert_eq!(result.target.cost_per_hour, dec!(80.47));
    assert_eq!(result.target.effective_target_bill_rate, dec!(120));
    assert_eq!(result.proposed.status, MarginStatus::Ok);
    assert_eq!(result.totals.total_revenue, dec!(11500));
}

#[test]
fn incomplete_client_lists_missing_fields() {
    let service = seeded_simulation_service();

    match service.simulate(&freelance_request("globex")) {
        Err(SimulationServiceError::Margin(error @ MarginError::IncompleteClientConfig { .. })) => {
            assert_eq!(
                error.missing_field_names(),
                vec!["discountPercent", "forcedVacationDaysPerYear", "targetHourlyRate"]
            );
        }
        other => panic!("expected incomplete configuration, got {other:?}"),
    }
}

#[test]
fn incomplete_client_is_reported_before_invalid_input() {
    let service = seeded_simulation_service();
    let mut request = freelance_request("globex");
    request.proposed_bill_rate = Decimal::ZERO;
    request.planned_hours = dec!(-5);

    assert!(matches!(
        service.simulate(&request),
        Err(SimulationServiceError::Margin(
            MarginError::IncompleteClientConfig { .. }
        ))
    ));
}

#[test]
fn incomplete_client_is_reported_before_missing_parameters() {
    let clients = Arc::new(InMemoryClientRepository::default());
    crate::clients::ClientConfigService::new(clients.clone())
        .update(
            crate::clients::ClientId("globex".to_string()),
            None,
            partial_commercial(),
        )
        .expect("seed globex");
    let service = MarginSimulationService::new(
        clients,
        Arc::new(InMemoryCostParameterRepository::default()),
        Arc::new(crate::memory::InMemoryScenarioRepository::default()),
    );

    assert!(matches!(
        service.simulate(&freelance_request("globex")),
        Err(SimulationServiceError::Margin(
            MarginError::IncompleteClientConfig { .. }
        ))
    ));
}

#[test]
fn unknown_client_is_not_found() {
    let service = seeded_simulation_service();
    match service.simulate(&freelance_request("umbrella")) {
        Err(SimulationServiceError::ClientNotFound(id)) => assert_eq!(id, "umbrella"),
        other => panic!("expected client not found, got {other:?}"),
    }
}

#[test]
fn missing_parameter_set_is_reported() {
    let service = unconfigured_simulation_service();
    assert!(matches!(
        service.simulate(&freelance_request("acme")),
        Err(SimulationServiceError::NoActiveParameters)
    ));
}

#[test]
fn zero_proposed_rate_is_invalid_input() {
    let service = seeded_simulation_service();
    let mut request = freelance_request("acme");
    request.proposed_bill_rate = Decimal::ZERO;

    match service.simulate(&request) {
        Err(SimulationServiceError::Margin(MarginError::InvalidInput { field, .. })) => {
            assert_eq!(field, "proposedBillRate");
        }
        other => panic!("expected invalid input, got {other:?}"),
    }
}

#[test]
fn saved_scenarios_keep_their_result() {
    let service = seeded_simulation_service();

    let saved = service
        .save_scenario(NewScenario {
            name: " Acme renewal ".to_string(),
            request: freelance_request("acme"),
        })
        .expect("scenario saved");

    assert_eq!(saved.name, "Acme renewal");
    assert_eq!(saved.result.margin_delta_points, dec!(-2.91));

    let fetched = service.scenario(&saved.id).expect("scenario fetched");
    assert_eq!(fetched, saved);
    assert_eq!(service.scenarios().expect("list").len(), 1);
}

#[test]
fn scenario_requires_a_name_and_a_valid_simulation() {
    let service = seeded_simulation_service();

    assert!(matches!(
        service.save_scenario(NewScenario {
            name: "  ".to_string(),
            request: freelance_request("acme"),
        }),
        Err(SimulationServiceError::EmptyScenarioName)
    ));
    assert!(matches!(
        service.save_scenario(NewScenario {
            name: "globex draft".to_string(),
            request: freelance_request("globex"),
        }),
        Err(SimulationServiceError::Margin(_))
    ));
    assert!(service.scenarios().expect("list").is_empty());
}

#[test]
fn unknown_scenario_is_not_found() {
    let service = seeded_simulation_service();
    assert!(matches!(
        service.scenario(&ScenarioId("scn-missing".to_string())),
        Err(SimulationServiceError::ScenarioNotFound(_))
    ));
}

#[test]
fn repository_failures_propagate() {
    let service = MarginSimulationService::new(
        Arc::new(UnavailableRepository),
        Arc::new(UnavailableRepository),
        Arc::new(UnavailableRepository),
    );
    assert!(matches!(
        service.simulate(&freelance_request("acme")),
        Err(SimulationServiceError::Repository(_))
    ));
}
