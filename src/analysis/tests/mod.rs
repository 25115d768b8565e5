mod test_ngon_basic;
mod test_slivers_basic;
