mod auth_test;
mod budget_test;
mod centre_test;
mod helpers;
mod router_test;
