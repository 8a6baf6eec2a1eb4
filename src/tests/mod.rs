mod common;

mod test_matchmaking_flow;
