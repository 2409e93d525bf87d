mod remote_document;
