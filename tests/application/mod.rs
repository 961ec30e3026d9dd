mod job_service_test;
