// src/config/consts.rs

// Input
pub const DEFAULT_INPUT_DIR: &str = "responses";
pub const ENVELOPE_KEY: &str = "d";

// Logging
pub const LOG_ENV: &str = "SCHOOL_SCRAPE_LOG";

// Output
pub const CELL_SEP: char = '\t';

// Anchors shared by every schema version
pub const NAME_CLASS: &str = "infobox_name";
pub const ADDRESS_CLASS: &str = "infobox_address";
pub const CAPACITY_ID: &str = "capacity";
pub const OUTCOME_CLASS: &str = "infobox_report_outcome";
pub const RANKING_CLASS: &str = "infobox_exam_ranking";
pub const OVERSUBSCRIBED_PATTERN: &str = "infobox_admissions_(not_)?oversubscribed$";
pub const CATCHMENT_CLASS: &str = "infobox_catchment_chart";
pub const LDO_CLASS: &str = "infobox_catchment_ldo_chart";
pub const CHART_ATTR: &str = "data-chart";
pub const ANSWERS_CLASS: &str = "answers-graph";
pub const CHART_DATA_PARAM: &str = "chd";
