#![warn(missing_docs)]

/*! This is a crate for sizing the components of an energy supply system with genetic algorithms.
Each solution is a vector of capacity indicators, i.e. the share of every viable component's
maximum capacity that is installed, and every operator keeps the indicators of each placement
category able to cover the full demand.

```
use capacity_indicators::{CapacityIndicatorVector, Category, Settings, Toolbox};
use rand::SeedableRng;

let template = CapacityIndicatorVector::from_structure(vec![
    ("VCC1", Category::Primary),
    ("ACH1", Category::Primary),
    ("BO1", Category::Secondary),
    ("CT1", Category::Tertiary),
])
.unwrap();
let toolbox = Toolbox::new(template, Settings::default()).unwrap();
let mut rng = rand::rngs::StdRng::seed_from_u64(1);
let mut civ = toolbox.generate(&mut rng).unwrap();
toolbox.mutate(&mut civ, &mut rng).unwrap();
assert!(civ.is_feasible());
assert_eq!(civ.get_cat(Category::Primary).len(), 2);
```
!*/

pub mod core;
pub mod ops;
pub mod settings;
pub mod toolbox;

pub use crate::core::{CapacityIndicator, CapacityIndicatorVector, Category, Fitness, IndicatorError};
pub use crate::ops::OperatorError;
pub use crate::settings::Settings;
pub use crate::toolbox::Toolbox;
