//! Descriptor model shared by the scanner, the rule compiler and the emitter.

mod endpoint;
mod fields;
mod rules;
mod visibility;

use indexmap::IndexMap;

pub use endpoint::{EndpointConfig, EndpointDescriptor};
pub use fields::{FieldDescriptor, FieldKind, IntegerPrimitive, ParamStructDescriptor};
pub use rules::{RuleKind, ValidatorRule};
pub use visibility::Visibility;


/// Everything the emitter needs for one output file.
///
/// Both maps keep discovery order so generated output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptorSet {
  pub endpoints: IndexMap<String, Vec<EndpointDescriptor>>,
  pub structs: IndexMap<String, ParamStructDescriptor>,
}

impl DescriptorSet {
  pub fn receiver_count(&self) -> usize {
    self.endpoints.len()
  }

  pub fn endpoint_count(&self) -> usize {
    self.endpoints.values().map(Vec::len).sum()
  }

  pub fn validator_count(&self) -> usize {
    self
      .structs
      .values()
      .flat_map(|def| &def.fields)
      .map(|field| field.validators.len())
      .sum()
  }

  pub fn iter_endpoints(&self) -> impl Iterator<Item = &EndpointDescriptor> {
    self.endpoints.values().flatten()
  }
}
