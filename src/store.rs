//! The entity value store.
//!
//! Two read-only collections feed each generation attempt: `attributes`
//! maps a category name to candidate value labels (the reserved `"Name"`
//! key supplies person names), and `numbered` maps a category name to
//! ordinally comparable values, candidates for the ordinal dimension. Both
//! load from the JSON shapes of `attribute_entity.json` /
//! `numbered_entity.json`; a built-in set keeps the crate usable without
//! data files.

use std::collections::BTreeMap;

use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

use crate::{
    error::{GenerateError, Result},
    synth::builder::Dimension,
};

pub const NAME_KEY: &str = "Name";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityStore {
    pub attributes: BTreeMap<String, Vec<String>>,
    pub numbered: BTreeMap<String, Vec<i64>>,
}

impl EntityStore {
    /// A small default data set.
    pub fn builtin() -> Self {
        let mut attributes = BTreeMap::new();
        attributes.insert(
            NAME_KEY.to_string(),
            strings(&[
                "Alice", "Bob", "Carol", "Dave", "Erin", "Frank", "Grace", "Heidi",
            ]),
        );
        attributes.insert(
            "Color".to_string(),
            strings(&[
                "Red", "Blue", "Green", "White", "Yellow", "Purple", "Orange", "Black",
            ]),
        );
        attributes.insert(
            "Pet".to_string(),
            strings(&[
                "Dog", "Cat", "Fish", "Bird", "Rabbit", "Horse", "Turtle", "Hamster",
            ]),
        );
        attributes.insert(
            "Drink".to_string(),
            strings(&[
                "Tea", "Coffee", "Milk", "Juice", "Water", "Cocoa", "Soda", "Cider",
            ]),
        );
        attributes.insert(
            "Sport".to_string(),
            strings(&[
                "Soccer", "Tennis", "Hockey", "Baseball", "Swimming", "Golf", "Rugby", "Cycling",
            ]),
        );
        attributes.insert(
            "Job".to_string(),
            strings(&[
                "Doctor", "Teacher", "Engineer", "Painter", "Baker", "Pilot", "Farmer", "Lawyer",
            ]),
        );

        let mut numbered = BTreeMap::new();
        numbered.insert("Position".to_string(), (1..=8).collect());
        numbered.insert("Floor".to_string(), (1..=8).collect());
        numbered.insert("Queue".to_string(), (1..=8).collect());

        Self {
            attributes,
            numbered,
        }
    }

    /// Parses the two entity files.
    pub fn from_json(attributes_json: &str, numbered_json: &str) -> Result<Self> {
        let attributes = serde_json::from_str(attributes_json)
            .map_err(|e| GenerateError::Store(format!("attribute entities: {e}")))?;
        let numbered = serde_json::from_str(numbered_json)
            .map_err(|e| GenerateError::Store(format!("numbered entities: {e}")))?;
        Ok(Self {
            attributes,
            numbered,
        })
    }

    /// Draws a puzzle shape: the Name dimension, one numbered category in
    /// natural order as the ordinal dimension, and `extra_dimensions`
    /// distinct attribute categories with shuffled labels, all truncated
    /// to `num_persons` values.
    pub fn draw_dimensions<R: Rng>(
        &self,
        rng: &mut R,
        num_persons: usize,
        extra_dimensions: usize,
    ) -> Result<Vec<Dimension>> {
        let names = self.attributes.get(NAME_KEY).ok_or_else(|| {
            GenerateError::Store(format!("no {NAME_KEY:?} entry in the attribute entities"))
        })?;
        if names.len() < num_persons {
            return Err(GenerateError::Store(format!(
                "{} names for {} persons",
                names.len(),
                num_persons
            ))
            .into());
        }
        let mut names = names.clone();
        names.shuffle(rng);
        names.truncate(num_persons);

        let numbered_keys: Vec<&String> = self
            .numbered
            .iter()
            .filter(|(_, values)| values.len() >= num_persons)
            .map(|(key, _)| key)
            .collect();
        let ordinal_key = *numbered_keys.choose(rng).ok_or_else(|| {
            GenerateError::Store(format!(
                "no numbered category with at least {num_persons} values"
            ))
        })?;
        let mut ordinal_values = self.numbered[ordinal_key].clone();
        ordinal_values.sort_unstable();
        ordinal_values.dedup();
        if ordinal_values.len() < num_persons {
            return Err(GenerateError::Store(format!(
                "numbered category {ordinal_key:?} has fewer than {num_persons} distinct values"
            ))
            .into());
        }
        ordinal_values.truncate(num_persons);

        let mut attribute_keys: Vec<&String> = self
            .attributes
            .iter()
            .filter(|(key, values)| key.as_str() != NAME_KEY && values.len() >= num_persons)
            .map(|(key, _)| key)
            .collect();
        if attribute_keys.len() < extra_dimensions {
            return Err(GenerateError::Store(format!(
                "need {extra_dimensions} attribute categories with at least {num_persons} \
                 values, have {}",
                attribute_keys.len()
            ))
            .into());
        }
        attribute_keys.shuffle(rng);

        let mut dims = vec![
            Dimension::categorical(NAME_KEY, names),
            Dimension::ordinal(ordinal_key.clone(), ordinal_values),
        ];
        for key in attribute_keys.into_iter().take(extra_dimensions) {
            let mut labels = self.attributes[key].clone();
            labels.shuffle(rng);
            labels.truncate(num_persons);
            dims.push(Dimension::categorical(key.clone(), labels));
        }
        Ok(dims)
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::synth::builder::{NAME_DIM, ORDINAL_DIM};

    #[test]
    fn builtin_store_draws_well_formed_shapes() {
        let store = EntityStore::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        for _ in 0..20 {
            let dims = store.draw_dimensions(&mut rng, 4, 3).unwrap();
            assert_eq!(dims.len(), 5);
            assert_eq!(dims[NAME_DIM].name, NAME_KEY);
            for dim in &dims {
                assert_eq!(dim.labels.len(), 4);
            }
            let ordinal = dims[ORDINAL_DIM].ordinal.as_ref().unwrap();
            assert!(ordinal.windows(2).all(|w| w[0] < w[1]));

            // No category twice.
            let mut seen: Vec<&str> = dims.iter().map(|d| d.name.as_str()).collect();
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), dims.len());
        }
    }

    #[test]
    fn draw_fails_without_enough_values() {
        let store = EntityStore::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(store.draw_dimensions(&mut rng, 9, 2).is_err());
        assert!(store.draw_dimensions(&mut rng, 3, 40).is_err());
    }

    #[test]
    fn from_json_parses_the_entity_file_shapes() {
        let store = EntityStore::from_json(
            r#"{"Name": ["Ada", "Bo", "Cy"], "Color": ["Red", "Blue", "Green"]}"#,
            r#"{"Position": [2, 1, 3]}"#,
        )
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let dims = store.draw_dimensions(&mut rng, 3, 1).unwrap();
        assert_eq!(dims[ORDINAL_DIM].ordinal, Some(vec![1, 2, 3]));
        assert_eq!(dims[2].name, "Color");

        assert!(EntityStore::from_json("[]", "{}").is_err());
    }
}
