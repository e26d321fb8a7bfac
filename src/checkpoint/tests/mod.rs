mod file;
mod record;

use crate::classifier::{Classifier, ClassifierConfig};

fn seeded_classifier(hidden: &[usize]) -> Classifier {
    let config = ClassifierConfig::new(4, 3, hidden).with_seed(17);
    Classifier::from_config(config).unwrap()
}
