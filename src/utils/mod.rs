pub(crate) mod typed_index_vec;
