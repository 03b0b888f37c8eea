//! Domain-focused tests for gate records and gate sequence mutations.

use crate::workflow::domain::{
    Gate, GateName, GateSequence, GateStatus, OwnerId, WorkflowDomainError,
};
use chrono::{TimeZone, Utc};
use eyre::{bail, ensure};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

/// A three-stage pipeline with all gates pending.
#[fixture]
fn pipeline() -> Result<GateSequence, WorkflowDomainError> {
    let mut sequence = GateSequence::new();
    sequence.add_gate("Design", "Alwin", None)?;
    sequence.add_gate("Engineering", "Berta", None)?;
    sequence.add_gate("Vendor Quote", "Cas", None)?;
    Ok(sequence)
}

fn gate_names(sequence: &GateSequence) -> Vec<&str> {
    sequence
        .gates()
        .iter()
        .map(|gate| gate.name().as_str())
        .collect()
}

#[rstest]
fn gate_name_trims_surrounding_whitespace() -> eyre::Result<()> {
    let name = GateName::new("  Design  ")?;
    ensure!(name.as_str() == "Design");
    Ok(())
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n")]
fn gate_name_rejects_empty_input(#[case] raw: &str) {
    assert_eq!(GateName::new(raw), Err(WorkflowDomainError::EmptyGateName));
}

#[rstest]
fn add_gate_appends_pending_gate_at_end(
    pipeline: Result<GateSequence, WorkflowDomainError>,
) -> eyre::Result<()> {
    let mut sequence = pipeline?;
    let owner_id = OwnerId::new();
    sequence.add_gate("Install", "Dee", Some(owner_id))?;

    ensure!(sequence.len() == 4);
    let Some(added) = sequence.gate(3) else {
        bail!("appended gate missing");
    };
    ensure!(added.name().as_str() == "Install");
    ensure!(added.owner_name() == "Dee");
    ensure!(added.owner_id() == Some(owner_id));
    ensure!(!added.is_completed());
    ensure!(added.completed_at().is_none());
    Ok(())
}

#[rstest]
fn add_gate_rejects_empty_name(
    pipeline: Result<GateSequence, WorkflowDomainError>,
) -> eyre::Result<()> {
    let mut sequence = pipeline?;
    let result = sequence.add_gate("   ", "Dee", None);

    ensure!(result == Err(WorkflowDomainError::EmptyGateName));
    ensure!(sequence.len() == 3);
    Ok(())
}

#[rstest]
fn remove_gate_shifts_later_gates_without_touching_fields(
    pipeline: Result<GateSequence, WorkflowDomainError>,
) -> eyre::Result<()> {
    let mut sequence = pipeline?;
    let removed = sequence.remove_gate(0)?;

    ensure!(removed.name().as_str() == "Design");
    ensure!(sequence.len() == 2);
    ensure!(gate_names(&sequence) == vec!["Engineering", "Vendor Quote"]);
    let Some(first) = sequence.gate(0) else {
        bail!("first gate missing after removal");
    };
    ensure!(first.owner_name() == "Berta");
    Ok(())
}

#[rstest]
fn remove_gate_rejects_out_of_bounds_index(
    pipeline: Result<GateSequence, WorkflowDomainError>,
) -> eyre::Result<()> {
    let mut sequence = pipeline?;
    let result = sequence.remove_gate(3);

    ensure!(result == Err(WorkflowDomainError::PositionOutOfBounds { index: 3, len: 3 }));
    ensure!(sequence.len() == 3);
    Ok(())
}

#[rstest]
fn reorder_moves_gate_to_resting_position(
    pipeline: Result<GateSequence, WorkflowDomainError>,
) -> eyre::Result<()> {
    let mut sequence = pipeline?;
    sequence.reorder(0, 2)?;

    ensure!(gate_names(&sequence) == vec!["Engineering", "Vendor Quote", "Design"]);
    Ok(())
}

#[rstest]
fn reorder_preserves_gate_fields(
    pipeline: Result<GateSequence, WorkflowDomainError>,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut sequence = pipeline?;
    sequence.set_completion(1, true, None, &clock)?;
    let before = sequence.gate(1).cloned();

    sequence.reorder(1, 0)?;

    ensure!(sequence.gate(0) == before.as_ref());
    Ok(())
}

#[rstest]
#[case(3, 0)]
#[case(0, 3)]
fn reorder_rejects_out_of_bounds_and_changes_nothing(
    pipeline: Result<GateSequence, WorkflowDomainError>,
    #[case] from: usize,
    #[case] to: usize,
) -> eyre::Result<()> {
    let mut sequence = pipeline?;
    let before = sequence.clone();
    let result = sequence.reorder(from, to);

    ensure!(result == Err(WorkflowDomainError::PositionOutOfBounds { index: 3, len: 3 }));
    ensure!(sequence == before);
    Ok(())
}

#[rstest]
fn set_completion_stamps_clock_time_when_no_timestamp_given(
    pipeline: Result<GateSequence, WorkflowDomainError>,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut sequence = pipeline?;
    sequence.set_completion(1, true, None, &clock)?;

    let Some(gate) = sequence.gate(1) else {
        bail!("completed gate missing");
    };
    ensure!(gate.is_completed());
    ensure!(gate.completed_at().is_some());
    Ok(())
}

#[rstest]
fn set_completion_records_explicit_timestamp(
    pipeline: Result<GateSequence, WorkflowDomainError>,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut sequence = pipeline?;
    let Some(at) = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).single() else {
        bail!("ambiguous fixture timestamp");
    };
    sequence.set_completion(0, true, Some(at), &clock)?;

    ensure!(sequence.gate(0).and_then(Gate::completed_at) == Some(at));
    Ok(())
}

#[rstest]
fn set_completion_keeps_existing_timestamp_when_recompleted(
    pipeline: Result<GateSequence, WorkflowDomainError>,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut sequence = pipeline?;
    let Some(at) = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).single() else {
        bail!("ambiguous fixture timestamp");
    };
    sequence.set_completion(0, true, Some(at), &clock)?;
    sequence.set_completion(0, true, None, &clock)?;

    ensure!(sequence.gate(0).and_then(Gate::completed_at) == Some(at));
    Ok(())
}

#[rstest]
fn completion_round_trip_restores_pending_and_clears_timestamp(
    pipeline: Result<GateSequence, WorkflowDomainError>,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut sequence = pipeline?;
    let before = sequence.clone();
    sequence.set_completion(1, true, None, &clock)?;
    sequence.set_completion(1, false, None, &clock)?;

    let Some(gate) = sequence.gate(1) else {
        bail!("reopened gate missing");
    };
    ensure!(!gate.is_completed());
    ensure!(gate.completed_at().is_none());
    ensure!(sequence == before);
    Ok(())
}

#[rstest]
fn set_completion_rejects_out_of_bounds_index(
    pipeline: Result<GateSequence, WorkflowDomainError>,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut sequence = pipeline?;
    let result = sequence.set_completion(7, true, None, &clock);

    ensure!(result == Err(WorkflowDomainError::PositionOutOfBounds { index: 7, len: 3 }));
    Ok(())
}

#[rstest]
fn rename_updates_gate_in_place(
    pipeline: Result<GateSequence, WorkflowDomainError>,
) -> eyre::Result<()> {
    let mut sequence = pipeline?;
    sequence.rename(2, "Procurement")?;

    ensure!(sequence.gate(2).map(|gate| gate.name().as_str()) == Some("Procurement"));
    Ok(())
}

#[rstest]
fn rename_rejects_empty_name_and_changes_nothing(
    pipeline: Result<GateSequence, WorkflowDomainError>,
) -> eyre::Result<()> {
    let mut sequence = pipeline?;
    let before = sequence.clone();
    let result = sequence.rename(2, "  ");

    ensure!(result == Err(WorkflowDomainError::EmptyGateName));
    ensure!(sequence == before);
    Ok(())
}

#[rstest]
fn reassign_replaces_owner_and_directory_reference(
    pipeline: Result<GateSequence, WorkflowDomainError>,
) -> eyre::Result<()> {
    let mut sequence = pipeline?;
    let owner_id = OwnerId::new();
    sequence.reassign(0, "Edda", Some(owner_id))?;

    let Some(gate) = sequence.gate(0) else {
        bail!("reassigned gate missing");
    };
    ensure!(gate.owner_name() == "Edda");
    ensure!(gate.owner_id() == Some(owner_id));
    Ok(())
}

#[rstest]
fn completed_record_without_timestamp_deserializes_as_completed() -> eyre::Result<()> {
    let stored = serde_json::json!([{
        "name": "Design",
        "owner_name": "Alwin",
        "owner_id": null,
        "status": { "state": "completed" }
    }]);
    let sequence: GateSequence = serde_json::from_value(stored)?;

    let Some(gate) = sequence.gate(0) else {
        bail!("stored gate missing");
    };
    ensure!(gate.is_completed());
    ensure!(gate.completed_at().is_none());
    if gate.status() != (GateStatus::Completed { at: None }) {
        bail!("expected completed-without-timestamp, got {:?}", gate.status());
    }
    Ok(())
}

#[rstest]
fn sequence_serialization_round_trips(
    pipeline: Result<GateSequence, WorkflowDomainError>,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut sequence = pipeline?;
    sequence.set_completion(0, true, None, &clock)?;

    let encoded = serde_json::to_value(&sequence)?;
    let decoded: GateSequence = serde_json::from_value(encoded)?;
    ensure!(decoded == sequence);
    Ok(())
}

#[rstest]
fn pending_gate_never_carries_a_timestamp() -> eyre::Result<()> {
    let gate = Gate::new(GateName::new("Design")?, "Alwin".to_owned(), None);
    ensure!(!gate.is_completed());
    ensure!(gate.completed_at().is_none());
    Ok(())
}
