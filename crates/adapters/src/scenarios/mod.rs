pub mod memory_scenario_provider;

pub use memory_scenario_provider::InMemoryScenarioProvider;
