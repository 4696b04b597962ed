use std::path::Path;

use super::{load_config, open_repo};

pub fn run(config: Option<&Path>, profile: Option<&str>) {
    let rc = load_config("list-templates", config, profile);
    let repo = open_repo("list-templates", &rc);

    let list = repo.list_all();
    if list.is_empty() {
        println!("(no templates found)");
        return;
    }
    for t in list {
        println!("{}", t.logical_name);
    }
    println!("-- {} templates --", list.len());
}
