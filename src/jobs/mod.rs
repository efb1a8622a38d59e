pub mod spend_reconcile;
