mod add;
mod helpers;
mod list;
mod session;

pub(crate) use add::cmd_add;
pub(crate) use list::{cmd_list, cmd_show};
pub(crate) use session::cmd_session;
