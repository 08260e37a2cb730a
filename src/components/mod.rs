pub mod details_panel;
pub mod force_graph;
pub mod legend;
pub mod paper_list;
pub mod search_box;
