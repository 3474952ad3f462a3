pub(crate) mod poller;
