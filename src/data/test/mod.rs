mod activity_check;
mod blacklist;
mod diplomacy_link;
mod guild;
mod leaderboard;
mod permission_grant;
mod rank;
