//! Default scenario derivation

use cost_model::{ScenarioTier, VolumeGroup};

/// Derive a default scenario tier from the airline type and the
/// destination airport volume group.
///
/// A low-cost carrier is LOW whatever the destination; otherwise a
/// high-volume destination is HIGH and anything else BASE. With neither
/// signal nothing is derived.
pub fn derive_scenario(is_low_cost: Option<bool>, destination_group: Option<VolumeGroup>) -> Option<ScenarioTier> {
    match (is_low_cost, destination_group) {
        (None, None) => None,
        (Some(true), _) => Some(ScenarioTier::Low),
        (_, Some(VolumeGroup::Group1)) => Some(ScenarioTier::High),
        _ => Some(ScenarioTier::Base),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_signal_derives_nothing() {
        assert_eq!(derive_scenario(None, None), None);
    }

    #[test]
    fn test_low_cost_overrides_volume_group() {
        assert_eq!(derive_scenario(Some(true), Some(VolumeGroup::Group1)), Some(ScenarioTier::Low));
        assert_eq!(derive_scenario(Some(true), None), Some(ScenarioTier::Low));
    }

    #[test]
    fn test_high_volume_destination() {
        assert_eq!(derive_scenario(None, Some(VolumeGroup::Group1)), Some(ScenarioTier::High));
        assert_eq!(derive_scenario(Some(false), Some(VolumeGroup::Group1)), Some(ScenarioTier::High));
    }

    #[test]
    fn test_otherwise_base() {
        assert_eq!(derive_scenario(Some(false), None), Some(ScenarioTier::Base));
        assert_eq!(derive_scenario(None, Some(VolumeGroup::Other)), Some(ScenarioTier::Base));
        assert_eq!(derive_scenario(Some(false), Some(VolumeGroup::Other)), Some(ScenarioTier::Base));
    }
}
