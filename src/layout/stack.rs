use super::*;

/// Assigns every layer a row, first declared on top.
///
/// Fails on the first repeated layer name.
pub fn build_slots(layers: &[LayerSpec]) -> Result<BTreeMap<&str, LayerSlot<'_>>, LayoutError> {
    let count = layers.len();
    let mut slots = BTreeMap::new();
    for (idx, layer) in layers.iter().enumerate() {
        let slot = LayerSlot {
            layer,
            display_index: count - 1 - idx,
        };
        if slots.insert(layer.name.as_str(), slot).is_some() {
            return Err(LayoutError::DuplicateLayer {
                name: layer.name.clone(),
            });
        }
    }
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn layers(names: &[&str]) -> Vec<LayerSpec> {
        names
            .iter()
            .map(|name| LayerSpec::new(name, &[], "#000000"))
            .collect()
    }

    #[test]
    fn first_declared_layer_is_top_row() {
        let layers = layers(&["A", "B", "C"]);
        let slots = build_slots(&layers).unwrap();
        assert_eq!(slots["A"].display_index, 2);
        assert_eq!(slots["B"].display_index, 1);
        assert_eq!(slots["C"].display_index, 0);
        assert_eq!(slots["C"].layer.name, "C");
    }

    #[test]
    fn empty_input_is_empty_map() {
        let slots = build_slots(&[]).unwrap();
        assert!(slots.is_empty());
    }

    #[test]
    fn duplicate_name_fails_fast() {
        let layers = layers(&["A", "B", "A"]);
        let err = build_slots(&layers).unwrap_err();
        assert_eq!(
            err,
            LayoutError::DuplicateLayer {
                name: "A".to_string()
            }
        );
    }

    proptest! {
        #[test]
        fn slots_are_a_bijection(names in prop::collection::hash_set("[a-z]{1,6}", 1..12)) {
            let names: Vec<String> = names.into_iter().collect();
            let specs: Vec<LayerSpec> = names
                .iter()
                .map(|name| LayerSpec::new(name, &[], "#000000"))
                .collect();
            let slots = build_slots(&specs).unwrap();
            let n = specs.len();
            prop_assert_eq!(slots.len(), n);
            let rows: HashSet<usize> = slots.values().map(|slot| slot.display_index).collect();
            prop_assert_eq!(rows, (0..n).collect::<HashSet<_>>());
            prop_assert_eq!(slots[names[0].as_str()].display_index, n - 1);
            prop_assert_eq!(slots[names[n - 1].as_str()].display_index, 0);
        }
    }
}
