mod helpers;

mod notification_test;
