mod combination_selector;
mod external_factors;
mod influence_list;
mod progress;
mod result_chart;
mod sku_selector;
mod step_basic;
mod step_data_selection;
mod step_result;
mod step_review;
pub mod store;
mod view;

pub use view::ForecastWizardView;
