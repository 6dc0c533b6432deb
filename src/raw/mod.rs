mod node;
mod raw_bst_map;

pub(crate) use raw_bst_map::RawBstMap;
