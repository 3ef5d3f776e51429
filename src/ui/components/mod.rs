pub mod category_bar;
pub mod editor_pane;
pub mod problem_detail;
pub mod problem_list;
pub mod quiz_pane;
pub mod solution_dialog;
