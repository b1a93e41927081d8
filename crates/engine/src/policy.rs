//! Per-kind admission rules.
//!
//! Each rule is a pure function taking the proposal and the category
//! slice — the existing assignments whose toggle shares the proposal's
//! kind — and returning a [`Decision`]. No store access happens here,
//! which keeps every rule testable in isolation.

use switchyard_core::{Assignment, Error, Result, ToggleKind};

/// What the engine must do with an admitted proposal.
#[derive(Debug, Clone)]
pub enum Decision {
    /// Persist the proposal as a new record.
    Create,
    /// Persist this already-mutated existing record instead of creating.
    Update(Assignment),
    /// Do nothing: the service is already excluded and the proposal is
    /// swallowed by design.
    Absorb,
}

/// Dispatch to the rule for the given kind.
pub fn admit(kind: ToggleKind, proposal: &Assignment, slice: &[Assignment]) -> Result<Decision> {
    match kind {
        ToggleKind::Blue => admit_blue(proposal, slice),
        ToggleKind::Green => admit_green(proposal, slice),
        ToggleKind::Red => admit_red(proposal, slice),
    }
}

/// Blue: globally shared while "on"; turning one's own "on" record "off"
/// claims the toggle exclusively.
pub fn admit_blue(proposal: &Assignment, slice: &[Assignment]) -> Result<Decision> {
    if proposal.excluded {
        return Err(Error::ExclusionNotApplicable {
            kind: ToggleKind::Blue,
        });
    }

    if proposal.enabled {
        let already_on = slice.iter().any(|s| {
            s.service_name == proposal.service_name
                && s.toggle_name == proposal.toggle_name
                && s.enabled
        });
        if already_on {
            return Err(Error::AlreadyEnabled {
                toggle: proposal.toggle_name.clone(),
                service: proposal.service_name.clone(),
            });
        }
        return Ok(Decision::Create);
    }

    // Disabling. If this exact (service, version) holds the toggle "on",
    // flip that record — the act of claiming exclusivity.
    if let Some(own) = slice.iter().find(|s| {
        s.is_for_service(&proposal.service_name, &proposal.service_version)
            && s.toggle_name == proposal.toggle_name
            && s.enabled
    }) {
        let mut claimed = own.clone();
        claimed.enabled = false;
        return Ok(Decision::Update(claimed));
    }

    // First "off" claim wins; afterwards the toggle is exclusive to the
    // claiming service.
    match slice
        .iter()
        .find(|s| s.toggle_name == proposal.toggle_name && !s.enabled)
    {
        None => Ok(Decision::Create),
        Some(holder) => Err(Error::ExclusiveTo {
            toggle: proposal.toggle_name.clone(),
            owner: holder.service_name.clone(),
        }),
    }
}

/// Green: the first "on" claim is globally exclusive; "off" is
/// per-service and non-exclusive.
pub fn admit_green(proposal: &Assignment, slice: &[Assignment]) -> Result<Decision> {
    if proposal.excluded {
        return Err(Error::ExclusionNotApplicable {
            kind: ToggleKind::Green,
        });
    }

    if proposal.enabled {
        return match slice
            .iter()
            .find(|s| s.toggle_name == proposal.toggle_name && s.enabled)
        {
            None => Ok(Decision::Create),
            Some(owner) => Err(Error::ExclusiveTo {
                toggle: proposal.toggle_name.clone(),
                owner: owner.service_name.clone(),
            }),
        };
    }

    let already_off = slice.iter().any(|s| {
        s.is_for_service(&proposal.service_name, &proposal.service_version)
            && s.toggle_name == proposal.toggle_name
            && !s.enabled
    });
    if already_off {
        return Err(Error::AlreadyDisabled {
            toggle: proposal.toggle_name.clone(),
            service: proposal.service_name.clone(),
        });
    }
    Ok(Decision::Create)
}

/// Red: open by default; an excluded service's further proposals are
/// absorbed, and exact duplicates are rejected.
pub fn admit_red(proposal: &Assignment, slice: &[Assignment]) -> Result<Decision> {
    let already_excluded = slice.iter().any(|s| {
        s.service_name == proposal.service_name
            && s.toggle_name == proposal.toggle_name
            && s.excluded
    });
    if already_excluded {
        return Ok(Decision::Absorb);
    }

    let duplicate = slice.iter().any(|s| {
        s.service_name == proposal.service_name
            && s.toggle_name == proposal.toggle_name
            && s.excluded == proposal.excluded
            && s.enabled == proposal.enabled
    });
    if duplicate {
        return Err(Error::AlreadyRegistered {
            toggle: proposal.toggle_name.clone(),
            service: proposal.service_name.clone(),
        });
    }
    Ok(Decision::Create)
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchyard_core::ErrorKind;

    fn proposal(
        id: &str,
        toggle: &str,
        service: &str,
        version: &str,
        enabled: bool,
    ) -> Assignment {
        Assignment::new(id, toggle, service, version, enabled)
    }

    // --- Blue ---

    #[test]
    fn blue_rejects_exclusion_flag() {
        let p = proposal("a1", "T1", "S1", "1.0", true).excluded();
        let err = admit_blue(&p, &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn blue_first_on_creates() {
        let p = proposal("a1", "T1", "S1", "1.0", true);
        assert!(matches!(admit_blue(&p, &[]).unwrap(), Decision::Create));
    }

    #[test]
    fn blue_duplicate_on_conflicts() {
        let existing = proposal("a1", "T1", "S1", "1.0", true);
        let p = proposal("a2", "T1", "S1", "1.0", true);
        let err = admit_blue(&p, &[existing]).unwrap_err();
        assert!(matches!(err, Error::AlreadyEnabled { .. }));
    }

    #[test]
    fn blue_on_by_another_service_still_creates() {
        // Blue "on" is globally shared.
        let existing = proposal("a1", "T1", "S1", "1.0", true);
        let p = proposal("a2", "T1", "S2", "1.0", true);
        assert!(matches!(
            admit_blue(&p, &[existing]).unwrap(),
            Decision::Create
        ));
    }

    #[test]
    fn blue_off_flips_own_on_record() {
        let existing = proposal("a1", "T1", "S1", "1.0", true);
        let p = proposal("a2", "T1", "S1", "1.0", false);
        match admit_blue(&p, std::slice::from_ref(&existing)).unwrap() {
            Decision::Update(rec) => {
                assert_eq!(rec.id, "a1");
                assert!(!rec.enabled);
            }
            other => panic!("expected update, got {other:?}"),
        }
    }

    #[test]
    fn blue_off_first_claim_creates() {
        let p = proposal("a1", "T1", "S1", "1.0", false);
        assert!(matches!(admit_blue(&p, &[]).unwrap(), Decision::Create));
    }

    #[test]
    fn blue_off_conflicts_and_names_the_holder() {
        let holder = proposal("a1", "T1", "S1", "1.0", false);
        let p = proposal("a2", "T1", "S2", "1.0", false);
        match admit_blue(&p, &[holder]).unwrap_err() {
            Error::ExclusiveTo { toggle, owner } => {
                assert_eq!(toggle, "T1");
                assert_eq!(owner, "S1");
            }
            other => panic!("expected ExclusiveTo, got {other:?}"),
        }
    }

    #[test]
    fn blue_duplicate_off_claim_by_holder_is_rejected() {
        // The holder already claimed exclusivity; a second "off" for the
        // same pair is a duplicate, not an idempotent success.
        let holder = proposal("a1", "T1", "S1", "1.0", false);
        let p = proposal("a2", "T1", "S1", "1.0", false);
        let err = admit_blue(&p, &[holder]).unwrap_err();
        assert!(matches!(err, Error::ExclusiveTo { .. }));
    }

    #[test]
    fn blue_slice_isolation_across_toggles() {
        // An "off" claim on T1 must not block claims on T2.
        let holder = proposal("a1", "T1", "S1", "1.0", false);
        let p = proposal("a2", "T2", "S2", "1.0", false);
        assert!(matches!(
            admit_blue(&p, &[holder]).unwrap(),
            Decision::Create
        ));
    }

    // --- Green ---

    #[test]
    fn green_rejects_exclusion_flag() {
        let p = proposal("a1", "T1", "S1", "1.0", false).excluded();
        let err = admit_green(&p, &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn green_first_on_is_exclusive() {
        let p = proposal("a1", "T1", "S1", "1.0", true);
        assert!(matches!(admit_green(&p, &[]).unwrap(), Decision::Create));

        let existing = proposal("a1", "T1", "S1", "1.0", true);
        let second = proposal("a2", "T1", "S2", "1.0", true);
        match admit_green(&second, &[existing]).unwrap_err() {
            Error::ExclusiveTo { owner, .. } => assert_eq!(owner, "S1"),
            other => panic!("expected ExclusiveTo, got {other:?}"),
        }
    }

    #[test]
    fn green_off_is_per_service() {
        let s1_off = proposal("a1", "T1", "S1", "1.0", false);
        let p = proposal("a2", "T1", "S2", "1.0", false);
        assert!(matches!(
            admit_green(&p, std::slice::from_ref(&s1_off)).unwrap(),
            Decision::Create
        ));

        // But not twice for the same (service, version).
        let dup = proposal("a3", "T1", "S1", "1.0", false);
        let err = admit_green(&dup, &[s1_off]).unwrap_err();
        assert!(matches!(err, Error::AlreadyDisabled { .. }));
    }

    // --- Red ---

    #[test]
    fn red_creates_openly() {
        let p = proposal("a1", "T1", "S1", "1.0", true);
        assert!(matches!(admit_red(&p, &[]).unwrap(), Decision::Create));

        let existing = proposal("a1", "T1", "S1", "1.0", true);
        let other_service = proposal("a2", "T1", "S2", "1.0", true);
        assert!(matches!(
            admit_red(&other_service, &[existing]).unwrap(),
            Decision::Create
        ));
    }

    #[test]
    fn red_exact_duplicate_conflicts() {
        let existing = proposal("a1", "T1", "S1", "1.0", true);
        let dup = proposal("a2", "T1", "S1", "1.0", true);
        let err = admit_red(&dup, &[existing]).unwrap_err();
        assert!(matches!(err, Error::AlreadyRegistered { .. }));
    }

    #[test]
    fn red_excluded_service_is_absorbed() {
        let excluded = proposal("a1", "T1", "S1", "1.0", true).excluded();
        // Any further proposal for (S1, T1) is swallowed, identical or not.
        let identical = proposal("a2", "T1", "S1", "1.0", true).excluded();
        let different = proposal("a3", "T1", "S1", "1.0", false);
        assert!(matches!(
            admit_red(&identical, std::slice::from_ref(&excluded)).unwrap(),
            Decision::Absorb
        ));
        assert!(matches!(
            admit_red(&different, &[excluded]).unwrap(),
            Decision::Absorb
        ));
    }

    #[test]
    fn red_exclusion_is_per_service() {
        let excluded = proposal("a1", "T1", "S1", "1.0", true).excluded();
        let other = proposal("a2", "T1", "S2", "1.0", true);
        assert!(matches!(
            admit_red(&other, &[excluded]).unwrap(),
            Decision::Create
        ));
    }
}
