mod gitea_client;
