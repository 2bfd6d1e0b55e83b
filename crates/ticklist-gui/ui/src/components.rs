mod details;
mod input_prompt;
mod sidebar;
mod tag_pill;
mod task_list;
mod task_list_row;

pub use details::Details;
pub use input_prompt::InputPrompt;
pub use sidebar::Sidebar;
pub use tag_pill::TagPillView;
pub use task_list::TaskList;
pub use task_list_row::TaskListRow;
