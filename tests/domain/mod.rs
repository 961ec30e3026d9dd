mod job_test;
