// Standard support articles loaded into an empty knowledge base

/// A knowledge-base article as inserted at seed time
#[derive(Debug, Clone, Copy)]
pub struct SeedArticle {
    /// Article title
    pub title: &'static str,
    /// Article body
    pub content: &'static str,
    /// Category label
    pub category: &'static str,
    /// Space-separated search tags
    pub tags: &'static str,
}

/// Articles seeded on first open
pub const SEED_ARTICLES: &[SeedArticle] = &[
    SeedArticle {
        title: "Return Policy",
        content: "Our return policy allows customers to return items within 30 days of purchase for a full refund. Items must be in original condition with tags attached. Returns can be processed online or in-store. Refunds are issued within 5-7 business days after we receive the returned item.",
        category: "Policies",
        tags: "return refund 30-days original-condition",
    },
    SeedArticle {
        title: "Shipping Information",
        content: "We offer multiple shipping options: Standard (5-8 business days, free on orders over $50), Express (2-3 business days, $9.99), and Overnight (next business day, $19.99). Tracking information is provided for all shipments.",
        category: "Shipping",
        tags: "shipping standard express overnight tracking",
    },
    SeedArticle {
        title: "Payment Methods",
        content: "We accept all major credit cards (Visa, MasterCard, American Express, Discover), PayPal, Apple Pay, Google Pay, and gift cards. For orders over $500, we also offer payment plans.",
        category: "Payment",
        tags: "credit-card paypal apple-pay google-pay gift-cards payment-plans",
    },
    SeedArticle {
        title: "Product Warranty",
        content: "All products come with a 1-year manufacturer warranty covering defects in materials and workmanship. Extended warranties are available for purchase. Warranty claims can be submitted online or by calling our support team.",
        category: "Warranty",
        tags: "warranty manufacturing-defects extended-warranty claims",
    },
    SeedArticle {
        title: "Account Management",
        content: "You can manage your account through our customer portal where you can view order history, update payment methods, change delivery addresses, and track package status. Password reset can be done through the login page.",
        category: "Account",
        tags: "account portal order-history payment-methods address password-reset",
    },
    SeedArticle {
        title: "Technical Support",
        content: "For technical issues with products, please check our troubleshooting guides on the product pages or contact our technical support team. We provide step-by-step troubleshooting, warranty service, and replacement for defective items.",
        category: "Support",
        tags: "technical-support troubleshooting warranty-service replacements",
    },
    SeedArticle {
        title: "Bulk Orders",
        content: "We offer special pricing for bulk orders with a minimum quantity of 50 units. Volume discounts start at 10% off retail pricing and can go up to 25% for larger orders. Contact our sales team for customized pricing.",
        category: "Sales",
        tags: "bulk-orders volume-discounts minimum-quantity sales-team",
    },
    SeedArticle {
        title: "International Shipping",
        content: "We ship internationally to most countries worldwide. International shipping takes 7-14 business days. Duties and taxes are the responsibility of the customer. Some restrictions may apply based on destination country.",
        category: "International",
        tags: "international-shipping duties taxes restrictions destination-country",
    },
    SeedArticle {
        title: "Live Chat Hours",
        content: "Our live chat support is available Monday through Friday, 8 AM to 6 PM EST. Weekend support is available Saturday 10 AM to 4 PM EST. Average response time is under 2 minutes during business hours.",
        category: "Support Hours",
        tags: "live-chat business-hours monday-friday weekend-response-time",
    },
    SeedArticle {
        title: "Store Locations",
        content: "We have physical stores in New York, Los Angeles, Chicago, Miami, and Dallas. Store hours are Monday-Saturday 10 AM to 9 PM, Sunday 12 PM to 6 PM. All stores offer product demonstrations, repair services, and same-day pickup for online orders.",
        category: "Stores",
        tags: "physical-stores nyc los-angeles chicago miami dallas store-hours demonstrations",
    },
    SeedArticle {
        title: "Price Match",
        content: "We offer a 30-day price match guarantee. If you find an item for less from an authorized retailer, we'll match the price plus give you 10% of the difference as store credit. Original receipt required.",
        category: "Policies",
        tags: "price-match guarantee authorized-retailer difference store-credit",
    },
    SeedArticle {
        title: "Gift Cards",
        content: "Gift cards are available for purchase in denominations from $25 to $500. They can be used online and in stores, have no expiration date, and cannot be refunded or exchanged for cash.",
        category: "Gifts",
        tags: "gift-cards denominations expiration-date",
    },
];
