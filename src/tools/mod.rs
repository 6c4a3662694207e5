pub mod bit_stream;
pub mod match_finder;
pub mod huff_tree;
